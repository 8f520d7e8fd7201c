//! Format definitions for the matrix exchange encodings
//!
//! This module contains the format tag enumeration and the fixed
//! constants of each encoding. No I/O operations.

pub mod constants;
pub mod tag;

// Re-export format definitions
pub use tag::FormatTag;
