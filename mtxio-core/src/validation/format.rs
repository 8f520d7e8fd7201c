//! Byte-level format signature checks

use crate::format::constants::{BITMAP_SIGNATURE, SIGNATURE_LEN};

/// Whether `prefix` starts with the bitmap container signature
pub fn has_bitmap_signature(prefix: &[u8]) -> bool {
    prefix.len() >= SIGNATURE_LEN && prefix[..SIGNATURE_LEN] == BITMAP_SIGNATURE
}

/// Whether `prefix` could still grow into the bitmap signature
///
/// Used by the detector to decide if it must keep reading before ruling
/// the bitmap container out.
pub fn is_signature_prefix(prefix: &[u8]) -> bool {
    let n = prefix.len().min(SIGNATURE_LEN);
    prefix[..n] == BITMAP_SIGNATURE[..n]
}
