//! Error types for the certificate binding protocol.

use thiserror::Error;
use zkc_crypto::HashError;
use zkc_merkle::TreeError;
use zkc_types::FieldElement;

/// Errors from certificate construction and decoding.
#[derive(Debug, Error)]
pub enum CertificateError {
    /// The content could not be hashed into a field element.
    #[error("hash certificate content: {0}")]
    ContentHash(#[source] HashError),

    /// The signed message could not be recomputed while verifying.
    #[error("verify signature: {0}")]
    SignatureHash(#[source] HashError),

    /// The provider signature does not verify over the content hash and
    /// holder commitment.
    #[error("invalid signature")]
    InvalidSignature,

    /// The nine-input leaf hash could not be computed.
    #[error("compute leaf hash: {0}")]
    LeafHash(#[source] HashError),

    /// A coordinate, scalar or address in the wire form failed to decode.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// A decoded certificate's stored value disagrees with the recomputed one.
    #[error("certificate {field} does not match its recomputed value")]
    BindingMismatch {
        /// Wire name of the offending field.
        field: &'static str,
    },

    /// The registered tree leaf does not hold the certificate's leaf hash.
    #[error("leaf {index} holds {found}, not the certificate leaf hash {expected}")]
    LeafMismatch {
        /// The registration's leaf index.
        index: usize,
        /// The certificate's leaf hash.
        expected: FieldElement,
        /// The value stored in the tree.
        found: FieldElement,
    },

    /// Tree access failed.
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Convenience alias for certificate results.
pub type CertificateResult<T> = Result<T, CertificateError>;
