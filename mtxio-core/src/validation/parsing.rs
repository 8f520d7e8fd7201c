//! Token parsing helpers for the text grammars
//!
//! Pure functions over `&str` with no I/O. Scalars are parsed by the
//! field; everything structural (indices, counts, markers) goes through
//! here.

use crate::MtxError;

/// Parse an unsigned decimal index or count
///
/// Only ASCII digits are accepted, so signs and embedded spaces are
/// rejected rather than silently normalized.
pub fn parse_index(s: &str) -> Result<usize, MtxError> {
    if s.is_empty() {
        return Err(MtxError::MalformedToken);
    }

    let mut result: usize = 0;

    for byte in s.bytes() {
        if !byte.is_ascii_digit() {
            return Err(MtxError::MalformedToken);
        }

        let digit = (byte - b'0') as usize;

        if result > (usize::MAX - digit) / 10 {
            return Err(MtxError::DimensionTooLarge);
        }

        result = result * 10 + digit;
    }

    Ok(result)
}

/// Whether `s` looks like an unsigned decimal integer
pub fn is_index(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `s` is a header type marker such as `M`
pub fn is_type_marker(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Classify the field shapes of a coordinate header line
///
/// Returns the number of leading integer fields and whether a single
/// alphabetic marker closes the line, or `None` if any other field
/// shows up.
pub fn header_shape<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<(usize, bool)> {
    let mut ints = 0;
    while let Some(field) = fields.next() {
        if is_index(field) {
            ints += 1;
        } else if is_type_marker(field) && fields.next().is_none() {
            return Some((ints, true));
        } else {
            return None;
        }
    }
    Some((ints, false))
}
