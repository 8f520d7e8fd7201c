//! Concrete vector shapes
//!
//! Reference storage for each [`VectorCategory`]. Any type that hands out
//! the matching [`VectorView`] works with readers and writers; these are
//! the ones the bundled row and column matrices are built from.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use super::{MatrixVector, VectorCategory, VectorStorage, VectorView, VectorViewMut};

const WORD_BITS: usize = 64;

/// Bit-addressable storage behind a dense zero-one vector
pub trait BitStore {
    /// Number of addressable bits
    fn bit_len(&self) -> usize;

    /// Read bit `index`; `index` must be below [`BitStore::bit_len`]
    fn get_bit(&self, index: usize) -> bool;

    /// Write bit `index`; `index` must be below [`BitStore::bit_len`]
    fn set_bit(&mut self, index: usize, value: bool);

    /// First set bit at or after `from`
    fn next_set_bit(&self, from: usize) -> Option<usize> {
        (from..self.bit_len()).find(|&i| self.get_bit(i))
    }
}

/// Packed dense zero-one vector, 64 bits per word
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
}

impl BitVector {
    /// All-zero vector of `len` bits
    pub fn with_width(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read bit `index`, false when out of range
    pub fn get(&self, index: usize) -> bool {
        index < self.len && self.words[index / WORD_BITS] >> (index % WORD_BITS) & 1 == 1
    }

    /// Write bit `index`
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "bit index {index} out of range {}", self.len);
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    fn clear_tail(&mut self) {
        let tail = self.len % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }
}

impl BitStore for BitVector {
    fn bit_len(&self) -> usize {
        self.len
    }

    fn get_bit(&self, index: usize) -> bool {
        self.get(index)
    }

    fn set_bit(&mut self, index: usize, value: bool) {
        self.set(index, value)
    }

    fn next_set_bit(&self, from: usize) -> Option<usize> {
        if from >= self.len {
            return None;
        }
        let mut word_index = from / WORD_BITS;
        let mut word = self.words[word_index] & (!0u64 << (from % WORD_BITS));
        loop {
            if word != 0 {
                let index = word_index * WORD_BITS + word.trailing_zeros() as usize;
                return (index < self.len).then_some(index);
            }
            word_index += 1;
            word = *self.words.get(word_index)?;
        }
    }
}

impl VectorStorage for BitVector {
    const CATEGORY: VectorCategory = VectorCategory::DenseZeroOne;

    fn with_width(width: usize) -> Self {
        BitVector::with_width(width)
    }

    fn width(&self) -> usize {
        self.len
    }

    fn set_width(&mut self, width: usize) {
        self.words.resize(width.div_ceil(WORD_BITS), 0);
        self.len = width;
        self.clear_tail();
    }
}

impl<E> MatrixVector<E> for BitVector {
    fn view(&self) -> VectorView<'_, E> {
        VectorView::DenseZeroOne(self)
    }

    fn view_mut(&mut self) -> VectorViewMut<'_, E> {
        VectorViewMut::DenseZeroOne(self)
    }
}

/// One stored scalar per slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseVector<E> {
    values: Vec<E>,
}

impl<E> DenseVector<E> {
    pub fn from_vec(values: Vec<E>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[E] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<E> {
        self.values
    }
}

impl<E: Clone + Default> VectorStorage for DenseVector<E> {
    const CATEGORY: VectorCategory = VectorCategory::Dense;

    fn with_width(width: usize) -> Self {
        Self {
            values: vec![E::default(); width],
        }
    }

    fn width(&self) -> usize {
        self.values.len()
    }

    fn set_width(&mut self, width: usize) {
        self.values.resize(width, E::default());
    }
}

impl<E: Clone + Default> MatrixVector<E> for DenseVector<E> {
    fn view(&self) -> VectorView<'_, E> {
        VectorView::Dense(&self.values)
    }

    fn view_mut(&mut self) -> VectorViewMut<'_, E> {
        VectorViewMut::Dense(&mut self.values)
    }
}

/// Strictly increasing `(index, scalar)` pairs
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector<E> {
    width: usize,
    entries: Vec<(usize, E)>,
}

impl<E> SparseVector<E> {
    pub fn entries(&self) -> &[(usize, E)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }
}

impl<E> VectorStorage for SparseVector<E> {
    const CATEGORY: VectorCategory = VectorCategory::Sparse;

    fn with_width(width: usize) -> Self {
        Self {
            width,
            entries: Vec::new(),
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn set_width(&mut self, width: usize) {
        self.entries.retain(|&(i, _)| i < width);
        self.width = width;
    }
}

impl<E> MatrixVector<E> for SparseVector<E> {
    fn view(&self) -> VectorView<'_, E> {
        VectorView::Sparse(&self.entries)
    }

    fn view_mut(&mut self) -> VectorViewMut<'_, E> {
        VectorViewMut::Sparse(&mut self.entries)
    }
}

/// Strictly increasing indices of set bits
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SparseBitVector {
    width: usize,
    indices: Vec<usize>,
}

impl SparseBitVector {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl VectorStorage for SparseBitVector {
    const CATEGORY: VectorCategory = VectorCategory::SparseZeroOne;

    fn with_width(width: usize) -> Self {
        Self {
            width,
            indices: Vec::new(),
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn set_width(&mut self, width: usize) {
        self.indices.retain(|&i| i < width);
        self.width = width;
    }
}

impl<E> MatrixVector<E> for SparseBitVector {
    fn view(&self) -> VectorView<'_, E> {
        VectorView::SparseZeroOne(&self.indices)
    }

    fn view_mut(&mut self) -> VectorViewMut<'_, E> {
        VectorViewMut::SparseZeroOne(&mut self.indices)
    }
}

/// Half-open run `[start, start + len)` of set bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRun {
    pub start: usize,
    pub len: usize,
}

impl BitRun {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last set bit
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Set bits stored as maximal runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HybridBitVector {
    width: usize,
    runs: Vec<BitRun>,
}

impl HybridBitVector {
    pub fn runs(&self) -> &[BitRun] {
        &self.runs
    }

    pub fn count_ones(&self) -> usize {
        self.runs.iter().map(|run| run.len).sum()
    }
}

impl VectorStorage for HybridBitVector {
    const CATEGORY: VectorCategory = VectorCategory::HybridZeroOne;

    fn with_width(width: usize) -> Self {
        Self {
            width,
            runs: Vec::new(),
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn set_width(&mut self, width: usize) {
        self.runs.retain(|run| run.start < width);
        if let Some(last) = self.runs.last_mut() {
            last.len = last.len.min(width - last.start);
        }
        self.width = width;
    }
}

impl<E> MatrixVector<E> for HybridBitVector {
    fn view(&self) -> VectorView<'_, E> {
        VectorView::HybridZeroOne(&self.runs)
    }

    fn view_mut(&mut self) -> VectorViewMut<'_, E> {
        VectorViewMut::HybridZeroOne(&mut self.runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_vector_word_boundaries() {
        let mut bits = BitVector::with_width(130);
        for i in [0, 63, 64, 127, 129] {
            bits.set(i, true);
        }
        assert_eq!(bits.count_ones(), 5);
        assert!(bits.get(63) && bits.get(64));
        assert!(!bits.get(65));
        assert!(!bits.get(500));

        let mut found = Vec::new();
        let mut from = 0;
        while let Some(i) = bits.next_set_bit(from) {
            found.push(i);
            from = i + 1;
        }
        assert_eq!(found, vec![0, 63, 64, 127, 129]);
    }

    #[test]
    fn test_bit_vector_shrink_clears_tail() {
        let mut bits = BitVector::with_width(10);
        bits.set(9, true);
        bits.set(2, true);
        bits.set_width(5);
        assert_eq!(bits.count_ones(), 1);
        bits.set_width(10);
        assert!(!bits.get(9));
        assert!(bits.get(2));
    }

    #[test]
    fn test_sparse_shapes_truncate_on_shrink() {
        let mut sparse = SparseVector::<u8>::with_width(10);
        sparse.entries.extend([(1, 3), (8, 4)]);
        sparse.set_width(5);
        assert_eq!(sparse.entries(), &[(1, 3)]);

        let mut hybrid = HybridBitVector::with_width(10);
        hybrid.runs.extend([BitRun::new(0, 2), BitRun::new(4, 5)]);
        hybrid.set_width(6);
        assert_eq!(hybrid.runs(), &[BitRun::new(0, 2), BitRun::new(4, 2)]);
        assert_eq!(hybrid.count_ones(), 4);
    }

    #[test]
    fn test_dense_vector_resize_fills_default() {
        let mut dense = DenseVector::from_vec(vec![1i64, 2]);
        dense.set_width(4);
        assert_eq!(dense.as_slice(), &[1, 2, 0, 0]);
    }
}
