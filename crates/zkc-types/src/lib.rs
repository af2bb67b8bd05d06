//! Foundation types for zkcert.
//!
//! Every value that flows through the Merkle accumulator and the certificate
//! binding protocol is a BN254 scalar-field element. This crate owns that
//! type, its canonical decimal text form, and the small wire types that sit
//! next to it in a certificate.
//!
//! # Key Types
//!
//! - [`FieldElement`]: canonically reduced BN254 scalar-field element
//! - [`Standard`]: certificate standard tag (e.g. `gip1`)
//! - [`Timestamp`]: UTC instant encoded as Unix seconds

pub mod error;
pub mod field;
pub mod standard;
pub mod timestamp;

pub use error::TypeError;
pub use field::FieldElement;
pub use standard::Standard;
pub use timestamp::Timestamp;
