//! Validation helpers shared by the grammars
//!
//! Pure functions with no I/O dependencies: token classification,
//! coordinate bounds and signature checks.

pub mod bounds;
pub mod format;
pub mod parsing;

pub use bounds::{check_coordinate, check_dimension};
pub use format::{has_bitmap_signature, is_signature_prefix};
pub use parsing::{header_shape, is_index, is_type_marker, parse_index};
