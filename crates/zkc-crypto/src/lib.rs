//! Cryptographic primitives for zkcert.
//!
//! Provides the Poseidon field hash used for tree nodes and certificate
//! leaf hashes, the empty-leaf constant, BabyJubJub curve points, and
//! EdDSA-Poseidon keys with the certificate signature service on top.
//!
//! All primitives wrap established libraries: arkworks for field and curve
//! arithmetic, `light-poseidon` for the circom-compatible permutation.

pub mod babyjub;
pub mod eddsa;
pub mod error;
pub mod hasher;
pub mod signer;

pub use babyjub::Point;
pub use eddsa::{PrivateKey, PublicKey, Signature};
pub use error::{HashError, KeyError};
pub use hasher::{empty_leaf_value, empty_leaf_value_for_seed, poseidon, poseidon_pair};
pub use signer::{certificate_message, sign_certificate, verify_signature};
