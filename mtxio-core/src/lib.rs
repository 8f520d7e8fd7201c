#![no_std]

//! mtxio Core - Matrix Exchange Format Definitions
//!
//! This crate provides the I/O-free half of matrix exchange: format tags
//! and constants, the scalar [`Field`] trait, vector shapes with their
//! capability views, the category-aware [`VectorPopulator`] and the
//! bitmap scanline codec.

extern crate alloc;

pub mod bitmap;
pub mod error;
pub mod fields;
pub mod format;
pub mod populate;
pub mod traits;
pub mod validation;
pub mod vector;

pub use bitmap::{BitmapHeader, SampleDepth};
pub use error::*;
pub use format::*;
pub use populate::VectorPopulator;
pub use traits::*;
pub use vector::{
    BitRun, BitStore, BitVector, DenseVector, HybridBitVector, MatrixVector, Scalar,
    SparseBitVector, SparseVector, VectorCategory, VectorStorage, VectorView, VectorViewMut,
};
