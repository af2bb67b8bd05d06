//! Error types for the foundation types.

use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Text that is not a canonical decimal integer.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// An integer at or above the field modulus where a reduced value was required.
    #[error("value is not a canonical field element: {0}")]
    NonCanonical(String),

    /// A Unix second count outside the range chrono can represent.
    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}
