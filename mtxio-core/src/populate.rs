//! Category-aware entry insertion
//!
//! Readers deliver entries one at a time; the populator decides how each
//! one lands in the target vector. Sparse shapes accept entries only in
//! strictly increasing index order, zero-one shapes store the truth value
//! of the scalar, and dense shapes overwrite the slot.

use crate::error::{MtxError, Result};
use crate::traits::Field;
use crate::vector::{BitRun, VectorViewMut};

/// Append policy bound to a field
#[derive(Debug, Clone, Copy)]
pub struct VectorPopulator<'f, F> {
    field: &'f F,
}

impl<'f, F: Field> VectorPopulator<'f, F> {
    pub fn new(field: &'f F) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &'f F {
        self.field
    }

    /// Append scalar `a` at `index`
    ///
    /// Zero scalars are skipped by sparse shapes and clear the bit of a
    /// dense zero-one vector. Sparse shapes reject an index that does not
    /// exceed the last stored one.
    pub fn append(
        &self,
        target: &mut VectorViewMut<'_, F::Element>,
        index: usize,
        a: F::Element,
    ) -> Result<()> {
        match target {
            VectorViewMut::Dense(values) => {
                let slot = values.get_mut(index).ok_or(MtxError::IndexOutOfBounds)?;
                *slot = a;
                Ok(())
            }
            VectorViewMut::Sparse(entries) => {
                if self.field.is_zero(&a) {
                    return Ok(());
                }
                if entries.last().is_some_and(|&(last, _)| last >= index) {
                    return Err(MtxError::OutOfOrderIndex);
                }
                entries.push((index, a));
                Ok(())
            }
            _ => {
                let value = !self.field.is_zero(&a);
                self.append_bit(target, index, value)
            }
        }
    }

    /// Append a truth value at `index` of a zero-one vector
    ///
    /// Dense and sparse scalar shapes are rejected with
    /// [`MtxError::UnsupportedVectorCategory`].
    pub fn append_bit(
        &self,
        target: &mut VectorViewMut<'_, F::Element>,
        index: usize,
        value: bool,
    ) -> Result<()> {
        match target {
            VectorViewMut::Dense(_) | VectorViewMut::Sparse(_) => {
                Err(MtxError::UnsupportedVectorCategory)
            }
            VectorViewMut::DenseZeroOne(bits) => {
                if index >= bits.bit_len() {
                    return Err(MtxError::IndexOutOfBounds);
                }
                bits.set_bit(index, value);
                Ok(())
            }
            VectorViewMut::SparseZeroOne(indices) => {
                if !value {
                    return Ok(());
                }
                if indices.last().is_some_and(|&last| last >= index) {
                    return Err(MtxError::OutOfOrderIndex);
                }
                indices.push(index);
                Ok(())
            }
            VectorViewMut::HybridZeroOne(runs) => {
                if !value {
                    return Ok(());
                }
                match runs.last_mut() {
                    Some(last) if last.end() > index => Err(MtxError::OutOfOrderIndex),
                    Some(last) if last.end() == index => {
                        last.len += 1;
                        Ok(())
                    }
                    _ => {
                        runs.push(BitRun::new(index, 1));
                        Ok(())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Gf2, Integers};
    use crate::vector::{
        BitVector, DenseVector, HybridBitVector, MatrixVector, SparseBitVector, SparseVector,
        VectorStorage,
    };
    use alloc::vec;

    #[test]
    fn test_sparse_skips_zero_and_enforces_order() {
        let field = Integers;
        let populator = VectorPopulator::new(&field);
        let mut v = SparseVector::<i64>::with_width(8);
        {
            let mut view = v.view_mut();
            populator.append(&mut view, 1, 5).unwrap();
            populator.append(&mut view, 2, 0).unwrap();
            populator.append(&mut view, 4, -3).unwrap();
            assert_eq!(
                populator.append(&mut view, 4, 7),
                Err(MtxError::OutOfOrderIndex)
            );
            assert_eq!(
                populator.append(&mut view, 0, 7),
                Err(MtxError::OutOfOrderIndex)
            );
        }
        assert_eq!(v.entries(), &[(1, 5), (4, -3)]);
    }

    #[test]
    fn test_dense_overwrites_and_checks_bounds() {
        let field = Integers;
        let populator = VectorPopulator::new(&field);
        let mut v = DenseVector::<i64>::with_width(3);
        let mut view = v.view_mut();
        populator.append(&mut view, 2, 9).unwrap();
        populator.append(&mut view, 0, 4).unwrap();
        assert_eq!(
            populator.append(&mut view, 3, 1),
            Err(MtxError::IndexOutOfBounds)
        );
        assert_eq!(v.as_slice(), &[4, 0, 9]);
    }

    #[test]
    fn test_zero_one_shapes_store_truth_value() {
        let field = Gf2;
        let populator = VectorPopulator::new(&field);

        let mut bits = BitVector::with_width(5);
        let mut view = MatrixVector::<bool>::view_mut(&mut bits);
        populator.append(&mut view, 3, true).unwrap();
        populator.append(&mut view, 1, false).unwrap();
        assert_eq!(bits.count_ones(), 1);
        assert!(bits.get(3));

        let mut indices = SparseBitVector::with_width(5);
        let mut view = MatrixVector::<bool>::view_mut(&mut indices);
        populator.append(&mut view, 0, true).unwrap();
        populator.append(&mut view, 2, false).unwrap();
        populator.append(&mut view, 4, true).unwrap();
        assert_eq!(indices.indices(), &[0, 4]);
    }

    #[test]
    fn test_dense_zero_one_clears_on_false() {
        let field = Gf2;
        let populator = VectorPopulator::new(&field);
        let mut bits = BitVector::with_width(4);
        {
            let mut view = MatrixVector::<bool>::view_mut(&mut bits);
            populator.append(&mut view, 2, true).unwrap();
            populator.append(&mut view, 2, false).unwrap();
            populator.append_bit(&mut view, 0, true).unwrap();
            populator.append_bit(&mut view, 0, false).unwrap();
        }
        assert_eq!(bits.count_ones(), 0);
        assert!(!bits.get(2));
    }

    #[test]
    fn test_hybrid_extends_contiguous_runs() {
        let field = Gf2;
        let populator = VectorPopulator::new(&field);
        let mut hybrid = HybridBitVector::with_width(16);
        {
            let mut view = MatrixVector::<bool>::view_mut(&mut hybrid);
            for i in [1, 2, 3, 7, 8, 12] {
                populator.append_bit(&mut view, i, true).unwrap();
            }
            assert_eq!(
                populator.append_bit(&mut view, 12, true),
                Err(MtxError::OutOfOrderIndex)
            );
        }
        assert_eq!(
            hybrid.runs(),
            &[BitRun::new(1, 3), BitRun::new(7, 2), BitRun::new(12, 1)]
        );
    }

    #[test]
    fn test_append_bit_rejects_scalar_shapes() {
        let field = Integers;
        let populator = VectorPopulator::new(&field);
        let mut v = DenseVector::from_vec(vec![0i64; 2]);
        let mut view = v.view_mut();
        assert_eq!(
            populator.append_bit(&mut view, 0, true),
            Err(MtxError::UnsupportedVectorCategory)
        );
    }
}
