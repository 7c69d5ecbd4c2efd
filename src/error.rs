use std::fmt;
use thiserror::Error;

/// Which of the two compared inputs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Original,
    Modified,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Original => f.write_str("original"),
            Side::Modified => f.write_str("modified"),
        }
    }
}

/// Errors raised when validating input at the library boundary.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("{side} input is not valid UTF-8: {source}")]
    InvalidUtf8 {
        side: Side,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("{side} input has {lines} lines, limit is {limit}")]
    InputTooLarge {
        side: Side,
        lines: usize,
        limit: usize,
    },
}

pub type Result<T> = std::result::Result<T, DiffError>;
