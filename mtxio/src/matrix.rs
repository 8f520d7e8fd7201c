//! Reference matrices built from one vector per row or column
//!
//! [`RowMatrix`] exposes only row vectors and [`ColMatrix`] only column
//! vectors, for any of the five vector shapes. Callers with their own
//! storage engine implement the capability traits directly instead.

use mtxio_core::{
    IterationOrder, MatrixShape, MatrixSource, MatrixTarget, MatrixVector, VectorCategory,
    VectorStorage, VectorView, VectorViewMut,
};

/// Row-major matrix holding one `V` per row
#[derive(Debug, Clone, PartialEq)]
pub struct RowMatrix<V> {
    rows: Vec<V>,
    cols: usize,
}

impl<V: VectorStorage> RowMatrix<V> {
    /// Empty 0×0 matrix
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            cols: 0,
        }
    }

    /// All-zero matrix of the given shape
    pub fn with_shape(rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| V::with_width(cols)).collect(),
            cols,
        }
    }

    pub fn row_vectors(&self) -> &[V] {
        &self.rows
    }

    pub fn row_vector_mut(&mut self, index: usize) -> Option<&mut V> {
        self.rows.get_mut(index)
    }
}

impl<V: VectorStorage> Default for RowMatrix<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VectorStorage> MatrixShape for RowMatrix<V> {
    fn rows(&self) -> usize {
        self.rows.len()
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn vector_category(&self) -> VectorCategory {
        V::CATEGORY
    }

    fn iteration_order(&self) -> IterationOrder {
        IterationOrder::RowMajor
    }
}

impl<E, V: MatrixVector<E>> MatrixSource<E> for RowMatrix<V> {
    fn row(&self, index: usize) -> Option<VectorView<'_, E>> {
        self.rows.get(index).map(MatrixVector::view)
    }

    fn col(&self, _index: usize) -> Option<VectorView<'_, E>> {
        None
    }
}

impl<E, V: MatrixVector<E>> MatrixTarget<E> for RowMatrix<V> {
    fn resize(&mut self, rows: usize, cols: usize) {
        self.rows.truncate(rows);
        if cols != self.cols {
            for row in &mut self.rows {
                row.set_width(cols);
            }
            self.cols = cols;
        }
        self.rows.resize_with(rows, || V::with_width(cols));
    }

    fn row_mut(&mut self, index: usize) -> Option<VectorViewMut<'_, E>> {
        self.rows.get_mut(index).map(MatrixVector::view_mut)
    }

    fn col_mut(&mut self, _index: usize) -> Option<VectorViewMut<'_, E>> {
        None
    }
}

/// Column-major matrix holding one `V` per column
#[derive(Debug, Clone, PartialEq)]
pub struct ColMatrix<V> {
    cols: Vec<V>,
    rows: usize,
}

impl<V: VectorStorage> ColMatrix<V> {
    /// Empty 0×0 matrix
    pub fn new() -> Self {
        Self {
            cols: Vec::new(),
            rows: 0,
        }
    }

    /// All-zero matrix of the given shape
    pub fn with_shape(rows: usize, cols: usize) -> Self {
        Self {
            cols: (0..cols).map(|_| V::with_width(rows)).collect(),
            rows,
        }
    }

    pub fn col_vectors(&self) -> &[V] {
        &self.cols
    }

    pub fn col_vector_mut(&mut self, index: usize) -> Option<&mut V> {
        self.cols.get_mut(index)
    }
}

impl<V: VectorStorage> Default for ColMatrix<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VectorStorage> MatrixShape for ColMatrix<V> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols.len()
    }

    fn vector_category(&self) -> VectorCategory {
        V::CATEGORY
    }

    fn iteration_order(&self) -> IterationOrder {
        IterationOrder::ColumnMajor
    }
}

impl<E, V: MatrixVector<E>> MatrixSource<E> for ColMatrix<V> {
    fn row(&self, _index: usize) -> Option<VectorView<'_, E>> {
        None
    }

    fn col(&self, index: usize) -> Option<VectorView<'_, E>> {
        self.cols.get(index).map(MatrixVector::view)
    }
}

impl<E, V: MatrixVector<E>> MatrixTarget<E> for ColMatrix<V> {
    fn resize(&mut self, rows: usize, cols: usize) {
        self.cols.truncate(cols);
        if rows != self.rows {
            for col in &mut self.cols {
                col.set_width(rows);
            }
            self.rows = rows;
        }
        self.cols.resize_with(cols, || V::with_width(rows));
    }

    fn row_mut(&mut self, _index: usize) -> Option<VectorViewMut<'_, E>> {
        None
    }

    fn col_mut(&mut self, index: usize) -> Option<VectorViewMut<'_, E>> {
        self.cols.get_mut(index).map(MatrixVector::view_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtxio_core::fields::Integers;
    use mtxio_core::{DenseVector, Scalar, SparseVector, VectorPopulator};

    #[test]
    fn test_resize_preserves_entries_inside_bounds() {
        let populator = VectorPopulator::new(&Integers);
        let mut m = RowMatrix::<SparseVector<i64>>::with_shape(3, 3);
        for (i, j, v) in [(0, 0, 1), (1, 2, 5), (2, 1, 7)] {
            let mut row = m.row_mut(i).unwrap();
            populator.append(&mut row, j, v).unwrap();
        }
        MatrixTarget::<i64>::resize(&mut m, 2, 2);
        assert_eq!(m.dimensions(), (2, 2));
        assert!(matches!(m.entry(0, 0), Some(Scalar::Value(&1))));
        assert!(m.entry(1, 2).is_none());
        assert_eq!(m.row_vectors()[1].nnz(), 0);

        MatrixTarget::<i64>::resize(&mut m, 0, 0);
        assert_eq!(m.dimensions(), (0, 0));
    }

    #[test]
    fn test_column_matrix_exposes_columns_only() {
        let mut m = ColMatrix::<DenseVector<i64>>::with_shape(2, 3);
        assert_eq!(m.iteration_order(), IterationOrder::ColumnMajor);
        assert!(MatrixSource::<i64>::row(&m, 0).is_none());
        {
            let mut col = m.col_mut(2).unwrap();
            VectorPopulator::new(&Integers)
                .append(&mut col, 1, 9)
                .unwrap();
        }
        assert!(matches!(m.entry(1, 2), Some(Scalar::Value(&9))));
        assert!(matches!(m.entry(0, 2), Some(Scalar::Value(&0))));
    }
}
