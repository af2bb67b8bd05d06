//! Error types for hashing and key handling.

use thiserror::Error;

/// Errors from field hashing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The Poseidon call itself failed (unsupported arity, out-of-field input).
    #[error("hash computation failed: {0}")]
    ComputationFailed(String),

    /// The permutation output is not a canonical field element.
    #[error("invalid hash")]
    InvalidEncoding,
}

/// Errors from key import and point decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The secret is not 32 bytes of hex.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The coordinates do not satisfy the BabyJubJub curve equation.
    #[error("point is not on the BabyJubJub curve")]
    NotOnCurve,
}
