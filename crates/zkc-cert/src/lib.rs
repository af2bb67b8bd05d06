//! Certificate binding protocol for zkcert.
//!
//! A certificate turns typed content into one field element, its leaf hash,
//! by chaining Poseidon over the content hash, the provider's public key and
//! EdDSA signature, the holder commitment, a salt and the expiration time.
//! The leaf hash is what gets inserted into the registry's Merkle tree, and
//! it also names the certificate: `did:<standard>:<leaf hash>`.
//!
//! Content layouts are not defined here. Anything implementing [`Content`]
//! can be certified.

pub mod certificate;
pub mod content;
pub mod error;
pub mod issued;
pub mod provider;

pub use certificate::{did, leaf_hash, Certificate};
pub use content::{Content, FfEncoder, FieldListContent};
pub use error::{CertificateError, CertificateResult};
pub use issued::{Address, IssuedCertificate, RegistrationDetails};
pub use provider::ProviderData;
