//! mtxio - Matrix Exchange Across Text and Bitmap Formats
//!
//! This library reads and writes matrices over an arbitrary scalar field in
//! seven text grammars and a grayscale bitmap container, detecting the
//! encoding of input streams from their leading bytes.
//!
//! ## Architecture
//!
//! mtxio keeps the format definitions apart from the I/O:
//!
//! - **mtxio-core**: format tags, the [`Field`] trait, vector shapes, the
//!   vector populator and the scanline codec (`no_std`, no I/O)
//! - **mtxio**: detection, text grammars, bitmap containers, and the
//!   reader and writer facades
//!
//! ## Quick Start
//!
//! ```rust
//! use mtxio::fields::Integers;
//! use mtxio::{FormatTag, MatrixReader, MatrixWriter, RowMatrix, SparseVector};
//!
//! fn example() -> Result<(), mtxio::Error> {
//!     let mut m = RowMatrix::<SparseVector<i64>>::new();
//!     let mut input = "[1 0; 0 -2]".as_bytes();
//!     let tag = MatrixReader::new(Integers).read(&mut input, &mut m, FormatTag::Detect)?;
//!     assert_eq!(tag, FormatTag::Matlab);
//!
//!     let text = MatrixWriter::new(Integers).write_to_string(&m, FormatTag::Guillaume)?;
//!     assert_eq!(text, "2 2 M\n1 1 1\n2 2 -2\n0 0 0\n");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **png** (default): PNG bitmap container
//! - **mmap** (default): memory-mapped file reads in [`MatrixReader::read_path`]
//! - **serde** (default): JSON configuration through [`IoConfig::from_json`]

// Re-export core abstractions and format definitions
pub use mtxio_core::{
    // Scalars
    fields, Field,
    // Format definitions
    constants, BitmapHeader, FormatTag, SampleDepth,
    // Matrix capabilities
    Axis, IterationOrder, MatrixShape, MatrixSource, MatrixTarget,
    // Vector shapes
    BitRun, BitStore, BitVector, DenseVector, HybridBitVector, MatrixVector, Scalar,
    SparseBitVector, SparseVector, VectorCategory, VectorPopulator, VectorStorage, VectorView,
    VectorViewMut,
    // Core errors
    ErrorCategory, MtxError,
};

// Implementation modules
pub mod assembler;
pub mod bitmap;
pub mod config;
pub mod detect;
pub mod error;
pub mod file_io;
pub mod grammar;
pub mod matrix;
pub mod reader;
pub mod scanner;
pub mod writer;

// Public exports
pub use assembler::MatrixAssembler;
pub use bitmap::{BitmapContainer, ScanlineSink, ScanlineSource};
pub use config::IoConfig;
pub use detect::{Detection, FormatDetector};
pub use error::{Error, Position, Result};
pub use file_io::format_for_path;
pub use grammar::{BracketStyle, CoordinateStyle, TextGrammar};
pub use matrix::{ColMatrix, RowMatrix};
pub use reader::MatrixReader;
pub use writer::MatrixWriter;

// Bitmap container features
#[cfg(feature = "png")]
pub use bitmap::PngContainer;
