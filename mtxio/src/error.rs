//! Error type for the std-side readers and writers

use std::fmt;

use mtxio_core::{ErrorCategory, MtxError};
use thiserror::Error;

/// Location in a text stream where input went wrong
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number
    pub line: Option<usize>,
    /// Byte offset from the start of the stream
    pub offset: Option<u64>,
}

impl Position {
    pub const fn new(line: usize, offset: u64) -> Self {
        Self {
            line: Some(line),
            offset: Some(offset),
        }
    }

    pub const fn is_known(&self) -> bool {
        self.line.is_some() || self.offset.is_some()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.offset) {
            (Some(line), Some(offset)) => write!(f, " at line {line} (byte {offset})"),
            (Some(line), None) => write!(f, " at line {line}"),
            (None, Some(offset)) => write!(f, " at byte {offset}"),
            (None, None) => Ok(()),
        }
    }
}

/// Errors surfaced by [`crate::MatrixReader`] and [`crate::MatrixWriter`]
#[derive(Debug, Error)]
pub enum Error {
    /// No format signature or header marker matched
    #[error("unrecognised matrix format")]
    UnrecognisedFormat,

    /// Structural or ordering violation in the input
    #[error("invalid matrix input{position}: {message}")]
    InvalidMatrixInput { message: String, position: Position },

    /// The format cannot carry this matrix, or has no reader/writer
    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by the bitmap container codec
    #[error("bitmap container error: {0}")]
    Container(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Invalid input without a known position
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidMatrixInput {
            message: message.into(),
            position: Position::default(),
        }
    }

    /// Invalid input at a known line and byte offset
    pub fn invalid_at(message: impl Into<String>, line: usize, offset: u64) -> Self {
        Error::InvalidMatrixInput {
            message: message.into(),
            position: Position::new(line, offset),
        }
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Error::NotImplemented(message.into())
    }

    pub fn container(err: impl fmt::Display) -> Self {
        Error::Container(err.to_string())
    }

    /// Attach a position to an input error that does not carry one yet
    pub fn at(self, line: usize, offset: u64) -> Self {
        match self {
            Error::InvalidMatrixInput { message, position } if !position.is_known() => {
                Error::InvalidMatrixInput {
                    message,
                    position: Position::new(line, offset),
                }
            }
            other => other,
        }
    }

    /// Taxonomy bucket, `None` for I/O, container and configuration errors
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Error::UnrecognisedFormat => Some(ErrorCategory::UnrecognisedFormat),
            Error::InvalidMatrixInput { .. } => Some(ErrorCategory::InvalidMatrixInput),
            Error::NotImplemented(_) => Some(ErrorCategory::NotImplemented),
            Error::Io(_) | Error::Container(_) | Error::Config(_) => None,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.category() == Some(ErrorCategory::InvalidMatrixInput)
    }

    pub fn is_not_implemented(&self) -> bool {
        self.category() == Some(ErrorCategory::NotImplemented)
    }
}

impl From<MtxError> for Error {
    fn from(err: MtxError) -> Self {
        match err.category() {
            ErrorCategory::UnrecognisedFormat => Error::UnrecognisedFormat,
            ErrorCategory::InvalidMatrixInput => Error::invalid(err.to_string()),
            ErrorCategory::NotImplemented => Error::NotImplemented(err.to_string()),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::Io(std::io::Error::other("scalar formatting failed"))
    }
}

/// Result type for std-side matrix exchange
pub type Result<T> = std::result::Result<T, Error>;
