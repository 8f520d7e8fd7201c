//! Index and dimension bounds checks
//!
//! Pure arithmetic on declared dimensions with no I/O.

use crate::MtxError;

/// Convert a `base`-indexed coordinate to 0-based and check it
///
/// Returns the 0-based `(row, col)` pair.
pub const fn check_coordinate(
    row: usize,
    col: usize,
    base: usize,
    rows: usize,
    cols: usize,
) -> Result<(usize, usize), MtxError> {
    if row < base || col < base {
        return Err(MtxError::IndexOutOfBounds);
    }
    let (row, col) = (row - base, col - base);
    if row >= rows || col >= cols {
        return Err(MtxError::IndexOutOfBounds);
    }
    Ok((row, col))
}

/// Reject declared dimensions above the configured limit
pub const fn check_dimension(value: usize, max: usize) -> Result<usize, MtxError> {
    if value > max {
        return Err(MtxError::DimensionTooLarge);
    }
    Ok(value)
}
