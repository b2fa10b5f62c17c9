//! Error types for the fallible edges of encnorm.
//!
//! The normalizer operations themselves never fail. Errors only surface from
//! configuration, the strict escape parser, and the file helpers.

use std::path::PathBuf;

use thiserror::Error;

/// Error while building a [`Normalizer`](crate::Normalizer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown encoding label: {label:?}")]
    UnknownEncoding { label: String },
}

/// Error while interpreting backslash escape sequences.
///
/// Offsets are byte offsets of the offending backslash in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("truncated \\{kind} escape at offset {offset}: expected {expected} hex digits")]
    TruncatedEscape {
        kind: char,
        offset: usize,
        expected: usize,
    },

    #[error("invalid hex digit {found:?} in \\{kind} escape at offset {offset}")]
    InvalidHexDigit {
        kind: char,
        offset: usize,
        found: char,
    },

    #[error("escape at offset {offset} names invalid code point U+{value:04X}")]
    InvalidCodePoint { offset: usize, value: u32 },

    #[error("trailing backslash at offset {offset}")]
    TrailingBackslash { offset: usize },

    #[error("named escape \\N at offset {offset} is not supported")]
    NamedEscapeUnsupported { offset: usize },
}

impl EscapeError {
    /// Returns the byte offset of the escape that failed.
    pub fn offset(&self) -> usize {
        match self {
            EscapeError::TruncatedEscape { offset, .. }
            | EscapeError::InvalidHexDigit { offset, .. }
            | EscapeError::InvalidCodePoint { offset, .. }
            | EscapeError::TrailingBackslash { offset }
            | EscapeError::NamedEscapeUnsupported { offset } => *offset,
        }
    }
}

/// Error from the file helpers in [`util::fs`](crate::util::fs).
#[derive(Debug, Error)]
pub enum FsError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Returns the path the failed operation was acting on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            FsError::Read { path, .. } | FsError::Write { path, .. } => path,
        }
    }
}
