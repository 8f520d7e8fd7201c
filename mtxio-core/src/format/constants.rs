//! Format constants and magic bytes for the supported encodings

/// Signature that opens every bitmap container stream (the PNG signature)
pub const BITMAP_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Length of the bitmap signature in bytes
pub const SIGNATURE_LEN: usize = BITMAP_SIGNATURE.len();

/// Default number of bytes the detector may consume before giving up
pub const DEFAULT_DETECT_LIMIT: usize = 4096;

/// Default upper bound on a declared row or column count
pub const DEFAULT_MAX_DIMENSION: usize = 1 << 31;

/// Coordinate grammar constants
pub mod coordinate {
    /// Type marker written into Guillaume headers by default
    pub const DEFAULT_MARKER: &str = "M";

    /// Sentinel line closing a Guillaume entry list
    pub const SENTINEL: &str = "0 0 0";

    /// Index base of Turner files
    pub const TURNER_BASE: usize = 0;

    /// Index base of OneBased and Guillaume files
    pub const ONE_BASE: usize = 1;
}

/// Bracketed grammar punctuation
pub mod bracket {
    pub const OPEN: char = '[';
    pub const CLOSE: char = ']';
    pub const COMMA: char = ',';
    pub const SEMICOLON: char = ';';
}

/// Placeholder printed for zero cells in pretty output
pub const PRETTY_ZERO: char = '.';
