//! Matrix capability traits
//!
//! Readers and writers never assume a storage layout. A matrix advertises
//! its dimensions, the category of its row/column vectors and the
//! iteration order it supports; everything else goes through vector views.

use crate::vector::{Scalar, VectorCategory, VectorView, VectorViewMut};

/// Iteration capability of a matrix, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterationOrder {
    /// Row vectors are accessible
    RowMajor,
    /// Column vectors are accessible
    ColumnMajor,
    /// Both row and column vectors are accessible
    Both,
}

/// Direction in which a reader or writer walks a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Cols,
}

impl IterationOrder {
    /// Whether row vectors can be requested
    pub const fn has_rows(self) -> bool {
        matches!(self, IterationOrder::RowMajor | IterationOrder::Both)
    }

    /// Whether column vectors can be requested
    pub const fn has_cols(self) -> bool {
        matches!(self, IterationOrder::ColumnMajor | IterationOrder::Both)
    }

    /// Axis used for exchange; a combined capability counts as row-major
    pub const fn primary_axis(self) -> Axis {
        match self {
            IterationOrder::RowMajor | IterationOrder::Both => Axis::Rows,
            IterationOrder::ColumnMajor => Axis::Cols,
        }
    }
}

impl core::fmt::Display for IterationOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IterationOrder::RowMajor => write!(f, "row-major"),
            IterationOrder::ColumnMajor => write!(f, "column-major"),
            IterationOrder::Both => write!(f, "row/column"),
        }
    }
}

/// Shape and capabilities shared by matrix sources and targets
pub trait MatrixShape {
    /// Number of rows
    fn rows(&self) -> usize;

    /// Number of columns
    fn cols(&self) -> usize;

    /// Category of the row (or column) vectors
    fn vector_category(&self) -> VectorCategory;

    /// Iteration capability
    fn iteration_order(&self) -> IterationOrder;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }
}

/// Matrix that can be written out
pub trait MatrixSource<E>: MatrixShape {
    /// View of a row vector
    ///
    /// Returns `None` if the matrix has no row capability or the index is
    /// out of bounds.
    fn row(&self, index: usize) -> Option<VectorView<'_, E>>;

    /// View of a column vector
    ///
    /// Returns `None` if the matrix has no column capability or the index
    /// is out of bounds.
    fn col(&self, index: usize) -> Option<VectorView<'_, E>>;

    /// Look up a single entry through whichever axis is available
    ///
    /// Returns `None` for entries that are not stored. Dense vectors store
    /// every slot, so a returned value may still be zero.
    fn entry(&self, row: usize, col: usize) -> Option<Scalar<'_, E>> {
        match self.iteration_order().primary_axis() {
            Axis::Rows => self.row(row)?.get(col),
            Axis::Cols => self.col(col)?.get(row),
        }
    }
}

/// Matrix that can be populated by a reader
pub trait MatrixTarget<E>: MatrixShape {
    /// Change the dimensions
    ///
    /// Entries inside the new bounds are preserved and new slots are zero,
    /// so `resize(0, 0)` clears the matrix.
    fn resize(&mut self, rows: usize, cols: usize);

    /// Mutable view of a row vector
    fn row_mut(&mut self, index: usize) -> Option<VectorViewMut<'_, E>>;

    /// Mutable view of a column vector
    fn col_mut(&mut self, index: usize) -> Option<VectorViewMut<'_, E>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_order_counts_as_rows() {
        assert_eq!(IterationOrder::Both.primary_axis(), Axis::Rows);
        assert_eq!(IterationOrder::RowMajor.primary_axis(), Axis::Rows);
        assert_eq!(IterationOrder::ColumnMajor.primary_axis(), Axis::Cols);
        assert!(IterationOrder::Both.has_rows() && IterationOrder::Both.has_cols());
        assert!(!IterationOrder::ColumnMajor.has_rows());
    }
}
