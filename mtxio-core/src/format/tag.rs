//! Format tag definitions
//!
//! A [`FormatTag`] names a concrete matrix encoding, or one of the two
//! control values `Detect` and `Unknown` which are never persisted.

use crate::MtxError;

/// Matrix encodings understood by the reader and writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[repr(u8)]
pub enum FormatTag {
    /// Ask the reader to detect the format from the stream content
    Detect = 0,
    /// Placeholder for an unidentified encoding
    Unknown = 1,
    /// `R C` header, 0-based `r c v` triples until end of stream
    Turner = 2,
    /// `R C N` header, exactly N 1-based `r c v` triples
    OneBased = 3,
    /// `R C T` header, 1-based `r c v` triples closed by `0 0 0`
    Guillaume = 4,
    /// Nested list `[[a, b], [c, d]]`
    Maple = 5,
    /// Bracketed rows separated by semicolons `[a b; c d]`
    Matlab = 6,
    /// One bracketed row per line `[a b]`
    Sage = 7,
    /// Human-readable table, write only
    Pretty = 8,
    /// One pixel per entry inside a bitmap container
    Bitmap = 9,
}

impl FormatTag {
    /// Every concrete (persistable) tag
    pub const CONCRETE: [FormatTag; 8] = [
        FormatTag::Turner,
        FormatTag::OneBased,
        FormatTag::Guillaume,
        FormatTag::Maple,
        FormatTag::Matlab,
        FormatTag::Sage,
        FormatTag::Pretty,
        FormatTag::Bitmap,
    ];

    /// Convert from u8 representation
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(FormatTag::Detect),
            1 => Some(FormatTag::Unknown),
            2 => Some(FormatTag::Turner),
            3 => Some(FormatTag::OneBased),
            4 => Some(FormatTag::Guillaume),
            5 => Some(FormatTag::Maple),
            6 => Some(FormatTag::Matlab),
            7 => Some(FormatTag::Sage),
            8 => Some(FormatTag::Pretty),
            9 => Some(FormatTag::Bitmap),
            _ => None,
        }
    }

    /// Convert to u8 representation
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Whether the tag identifies an actual encoding
    pub const fn is_concrete(self) -> bool {
        !matches!(self, FormatTag::Detect | FormatTag::Unknown)
    }

    /// Whether the encoding lists only nonzero `(row, col, value)` triples
    pub const fn is_coordinate(self) -> bool {
        matches!(
            self,
            FormatTag::Turner | FormatTag::OneBased | FormatTag::Guillaume
        )
    }

    /// Whether the encoding writes every cell positionally
    pub const fn is_dense_text(self) -> bool {
        matches!(
            self,
            FormatTag::Maple | FormatTag::Matlab | FormatTag::Sage | FormatTag::Pretty
        )
    }

    /// Whether a reader exists for this encoding
    pub const fn is_readable(self) -> bool {
        self.is_concrete() && !matches!(self, FormatTag::Pretty)
    }

    /// Stable lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            FormatTag::Detect => "detect",
            FormatTag::Unknown => "unknown",
            FormatTag::Turner => "turner",
            FormatTag::OneBased => "one-based",
            FormatTag::Guillaume => "guillaume",
            FormatTag::Maple => "maple",
            FormatTag::Matlab => "matlab",
            FormatTag::Sage => "sage",
            FormatTag::Pretty => "pretty",
            FormatTag::Bitmap => "bitmap",
        }
    }

    /// Guess a tag from a file extension (without the leading dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let tag = match ext.to_ascii_lowercase().as_str() {
            "sms" => FormatTag::Guillaume,
            "png" => FormatTag::Bitmap,
            "m" => FormatTag::Matlab,
            "mpl" => FormatTag::Maple,
            "sage" => FormatTag::Sage,
            "txt" => FormatTag::Pretty,
            _ => return None,
        };
        Some(tag)
    }
}

impl Default for FormatTag {
    fn default() -> Self {
        FormatTag::Detect
    }
}

impl core::fmt::Display for FormatTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.name())
    }
}

impl core::str::FromStr for FormatTag {
    type Err = MtxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s.trim().to_ascii_lowercase().as_str() {
            "detect" => FormatTag::Detect,
            "unknown" => FormatTag::Unknown,
            "turner" => FormatTag::Turner,
            "one-based" | "onebased" | "one_based" => FormatTag::OneBased,
            "guillaume" | "sms" => FormatTag::Guillaume,
            "maple" => FormatTag::Maple,
            "matlab" => FormatTag::Matlab,
            "sage" => FormatTag::Sage,
            "pretty" => FormatTag::Pretty,
            "bitmap" | "png" => FormatTag::Bitmap,
            _ => return Err(MtxError::UnsupportedFormat),
        };
        Ok(tag)
    }
}
