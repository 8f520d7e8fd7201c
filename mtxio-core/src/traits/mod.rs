//! Abstract interfaces for matrix exchange
//!
//! This module defines the collaborator traits consumed by readers and
//! writers: the scalar field and the matrix capability interface.

pub mod field;
pub mod matrix;

pub use field::Field;
pub use matrix::{Axis, IterationOrder, MatrixShape, MatrixSource, MatrixTarget};
