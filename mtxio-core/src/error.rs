//! Error types for matrix exchange operations

/// Errors that can occur while detecting, parsing or emitting a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MtxError {
    /// No format signature or marker matched the stream
    UnrecognisedFormat,
    /// Dimension header is missing or malformed
    MalformedHeader,
    /// A token could not be parsed as an index or scalar
    MalformedToken,
    /// Index lies outside the declared dimensions
    IndexOutOfBounds,
    /// Sparse append arrived out of increasing index order
    OutOfOrderIndex,
    /// A dense row has a different width than the first row
    WidthMismatch,
    /// Coordinate list ended without its terminator
    MissingTerminator,
    /// Bitmap scanline is shorter than the declared width
    ScanlineTooShort,
    /// Declared dimension exceeds the configured limit
    DimensionTooLarge,
    /// Vector category cannot be used with the requested format
    UnsupportedVectorCategory,
    /// Matrix iteration order cannot be used with the requested format
    UnsupportedIterationOrder,
    /// Format tag has no reader or writer in this direction
    UnsupportedFormat,
}

/// Coarse error taxonomy surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Format detection found no matching signature or marker
    UnrecognisedFormat,
    /// A grammar's structural or ordering invariant was violated
    InvalidMatrixInput,
    /// The requested format/capability pairing is structurally unsupported
    NotImplemented,
}

impl MtxError {
    /// Map the error onto the three-way taxonomy
    pub const fn category(self) -> ErrorCategory {
        match self {
            MtxError::UnrecognisedFormat => ErrorCategory::UnrecognisedFormat,
            MtxError::UnsupportedVectorCategory
            | MtxError::UnsupportedIterationOrder
            | MtxError::UnsupportedFormat => ErrorCategory::NotImplemented,
            MtxError::MalformedHeader
            | MtxError::MalformedToken
            | MtxError::IndexOutOfBounds
            | MtxError::OutOfOrderIndex
            | MtxError::WidthMismatch
            | MtxError::MissingTerminator
            | MtxError::ScanlineTooShort
            | MtxError::DimensionTooLarge => ErrorCategory::InvalidMatrixInput,
        }
    }
}

impl core::fmt::Display for MtxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MtxError::UnrecognisedFormat => "Unrecognised matrix format",
            MtxError::MalformedHeader => "Malformed dimension header",
            MtxError::MalformedToken => "Malformed index or scalar token",
            MtxError::IndexOutOfBounds => "Index out of bounds",
            MtxError::OutOfOrderIndex => "Index out of increasing order",
            MtxError::WidthMismatch => "Row width differs from first row",
            MtxError::MissingTerminator => "Entry list is missing its terminator",
            MtxError::ScanlineTooShort => "Scanline shorter than row width",
            MtxError::DimensionTooLarge => "Dimension exceeds configured limit",
            MtxError::UnsupportedVectorCategory => "Vector category not supported by format",
            MtxError::UnsupportedIterationOrder => "Iteration order not supported by format",
            MtxError::UnsupportedFormat => "Format not supported in this direction",
        };
        write!(f, "{msg}")
    }
}

impl core::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ErrorCategory::UnrecognisedFormat => "unrecognised format",
            ErrorCategory::InvalidMatrixInput => "invalid matrix input",
            ErrorCategory::NotImplemented => "not implemented",
        };
        write!(f, "{msg}")
    }
}

/// Result type for core matrix exchange operations
pub type Result<T> = core::result::Result<T, MtxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            MtxError::UnrecognisedFormat.category(),
            ErrorCategory::UnrecognisedFormat
        );
        assert_eq!(
            MtxError::OutOfOrderIndex.category(),
            ErrorCategory::InvalidMatrixInput
        );
        assert_eq!(
            MtxError::ScanlineTooShort.category(),
            ErrorCategory::InvalidMatrixInput
        );
        assert_eq!(
            MtxError::UnsupportedIterationOrder.category(),
            ErrorCategory::NotImplemented
        );
    }
}
