//! Vector shapes and capability views
//!
//! Every row or column of a matrix is one of five mutually exclusive
//! shapes. Readers and writers only ever see a vector through
//! [`VectorView`] or [`VectorViewMut`], a closed tagged union that is
//! matched exhaustively; adding a sixth shape is a localized change here
//! and in the populator.

pub mod shapes;

use core::ops::Range;

pub use shapes::{
    BitRun, BitStore, BitVector, DenseVector, HybridBitVector, SparseBitVector, SparseVector,
};

/// Storage shape of one matrix row or column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorCategory {
    /// One explicitly stored scalar per slot
    Dense,
    /// Strictly increasing `(index, scalar)` pairs, zeros omitted
    Sparse,
    /// One bit per slot
    DenseZeroOne,
    /// Strictly increasing indices of set bits
    SparseZeroOne,
    /// Maximal runs of set bits with increasing start
    HybridZeroOne,
}

impl VectorCategory {
    /// Whether entries are restricted to the two boolean values
    pub const fn is_zero_one(self) -> bool {
        matches!(
            self,
            VectorCategory::DenseZeroOne
                | VectorCategory::SparseZeroOne
                | VectorCategory::HybridZeroOne
        )
    }

    /// Whether appends must arrive in increasing index order
    pub const fn requires_ordered_appends(self) -> bool {
        matches!(
            self,
            VectorCategory::Sparse | VectorCategory::SparseZeroOne | VectorCategory::HybridZeroOne
        )
    }
}

impl core::fmt::Display for VectorCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            VectorCategory::Dense => "dense",
            VectorCategory::Sparse => "sparse",
            VectorCategory::DenseZeroOne => "dense zero-one",
            VectorCategory::SparseZeroOne => "sparse zero-one",
            VectorCategory::HybridZeroOne => "hybrid zero-one",
        };
        write!(f, "{name}")
    }
}

/// Shape-level storage operations, independent of the scalar type
pub trait VectorStorage {
    /// Category tag of this shape
    const CATEGORY: VectorCategory;

    /// Create an all-zero vector with the given width
    fn with_width(width: usize) -> Self;

    /// Number of slots
    fn width(&self) -> usize;

    /// Change the number of slots, dropping entries at or past `width`
    fn set_width(&mut self, width: usize);
}

/// Vector that exposes capability views over scalars of type `E`
pub trait MatrixVector<E>: VectorStorage {
    /// Read-only view
    fn view(&self) -> VectorView<'_, E>;

    /// Mutable view used by the populator
    fn view_mut(&mut self) -> VectorViewMut<'_, E>;
}

/// A stored entry as seen by a writer
#[derive(Debug)]
pub enum Scalar<'a, E> {
    /// Scalar held by a dense or sparse vector
    Value(&'a E),
    /// Set bit of a zero-one vector
    One,
}

impl<'a, E> Clone for Scalar<'a, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, E> Copy for Scalar<'a, E> {}

impl<'a, E> Scalar<'a, E> {
    /// Resolve to an element, substituting `one` for set bits
    pub fn resolve<'b>(self, one: &'b E) -> &'b E
    where
        'a: 'b,
    {
        match self {
            Scalar::Value(value) => value,
            Scalar::One => one,
        }
    }
}

/// Read-only capability view of one vector
pub enum VectorView<'a, E> {
    Dense(&'a [E]),
    Sparse(&'a [(usize, E)]),
    DenseZeroOne(&'a dyn BitStore),
    SparseZeroOne(&'a [usize]),
    HybridZeroOne(&'a [BitRun]),
}

impl<'a, E> Clone for VectorView<'a, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, E> Copy for VectorView<'a, E> {}

impl<'a, E> VectorView<'a, E> {
    /// Category of the viewed vector
    pub fn category(&self) -> VectorCategory {
        match self {
            VectorView::Dense(_) => VectorCategory::Dense,
            VectorView::Sparse(_) => VectorCategory::Sparse,
            VectorView::DenseZeroOne(_) => VectorCategory::DenseZeroOne,
            VectorView::SparseZeroOne(_) => VectorCategory::SparseZeroOne,
            VectorView::HybridZeroOne(_) => VectorCategory::HybridZeroOne,
        }
    }

    /// Stored entries in increasing index order
    ///
    /// Dense vectors yield every slot; the other shapes yield only
    /// nonzero entries.
    pub fn entries(&self) -> Entries<'a, E> {
        let inner = match *self {
            VectorView::Dense(values) => EntriesInner::Dense(values.iter().enumerate()),
            VectorView::Sparse(pairs) => EntriesInner::Sparse(pairs.iter()),
            VectorView::DenseZeroOne(bits) => EntriesInner::Bits { bits, next: 0 },
            VectorView::SparseZeroOne(indices) => EntriesInner::Indices(indices.iter()),
            VectorView::HybridZeroOne(runs) => EntriesInner::Runs {
                runs: runs.iter(),
                current: 0..0,
            },
        };
        Entries { inner }
    }

    /// Look up the entry at `index`, `None` if it is not stored
    pub fn get(&self, index: usize) -> Option<Scalar<'a, E>> {
        match *self {
            VectorView::Dense(values) => values.get(index).map(Scalar::Value),
            VectorView::Sparse(pairs) => pairs
                .binary_search_by_key(&index, |&(i, _)| i)
                .ok()
                .map(|pos| Scalar::Value(&pairs[pos].1)),
            VectorView::DenseZeroOne(bits) => {
                (index < bits.bit_len() && bits.get_bit(index)).then_some(Scalar::One)
            }
            VectorView::SparseZeroOne(indices) => {
                indices.binary_search(&index).ok().map(|_| Scalar::One)
            }
            VectorView::HybridZeroOne(runs) => {
                let pos = runs.partition_point(|run| run.start <= index);
                (pos > 0 && runs[pos - 1].contains(index)).then_some(Scalar::One)
            }
        }
    }
}

/// Mutable capability view of one vector
pub enum VectorViewMut<'a, E> {
    Dense(&'a mut [E]),
    Sparse(&'a mut alloc::vec::Vec<(usize, E)>),
    DenseZeroOne(&'a mut dyn BitStore),
    SparseZeroOne(&'a mut alloc::vec::Vec<usize>),
    HybridZeroOne(&'a mut alloc::vec::Vec<BitRun>),
}

impl<'a, E> VectorViewMut<'a, E> {
    /// Category of the viewed vector
    pub fn category(&self) -> VectorCategory {
        match self {
            VectorViewMut::Dense(_) => VectorCategory::Dense,
            VectorViewMut::Sparse(_) => VectorCategory::Sparse,
            VectorViewMut::DenseZeroOne(_) => VectorCategory::DenseZeroOne,
            VectorViewMut::SparseZeroOne(_) => VectorCategory::SparseZeroOne,
            VectorViewMut::HybridZeroOne(_) => VectorCategory::HybridZeroOne,
        }
    }
}

/// Iterator over the stored entries of a [`VectorView`]
pub struct Entries<'a, E> {
    inner: EntriesInner<'a, E>,
}

enum EntriesInner<'a, E> {
    Dense(core::iter::Enumerate<core::slice::Iter<'a, E>>),
    Sparse(core::slice::Iter<'a, (usize, E)>),
    Bits { bits: &'a dyn BitStore, next: usize },
    Indices(core::slice::Iter<'a, usize>),
    Runs {
        runs: core::slice::Iter<'a, BitRun>,
        current: Range<usize>,
    },
}

impl<'a, E> Iterator for Entries<'a, E> {
    type Item = (usize, Scalar<'a, E>);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Dense(iter) => iter.next().map(|(i, v)| (i, Scalar::Value(v))),
            EntriesInner::Sparse(iter) => iter.next().map(|(i, v)| (*i, Scalar::Value(v))),
            EntriesInner::Bits { bits, next } => {
                let index = bits.next_set_bit(*next)?;
                *next = index + 1;
                Some((index, Scalar::One))
            }
            EntriesInner::Indices(iter) => iter.next().map(|&i| (i, Scalar::One)),
            EntriesInner::Runs { runs, current } => loop {
                if let Some(index) = current.next() {
                    return Some((index, Scalar::One));
                }
                *current = runs.next()?.range();
            },
        }
    }
}
