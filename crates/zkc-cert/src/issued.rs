use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;
use zkc_merkle::{Proof, Tree};

use crate::certificate::Certificate;
use crate::error::{CertificateError, CertificateResult};

/// A 20-byte registry contract address, written as `0x` plus lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = CertificateError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        let bytes = hex::decode(digits)
            .map_err(|e| CertificateError::MalformedEncoding(format!("address {text:?}: {e}")))?;
        let bytes: [u8; 20] = bytes.try_into().map_err(|b: Vec<u8>| {
            CertificateError::MalformedEncoding(format!(
                "address {text:?}: expected 20 bytes, got {}",
                b.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Where a certificate was registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetails {
    pub address: Address,
    pub revocable: bool,
    pub leaf_index: usize,
}

/// A certificate together with its registration and inclusion proof.
///
/// The certificate's fields are inlined at the top level of the wire form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCertificate<T> {
    #[serde(flatten)]
    pub certificate: Certificate<T>,
    pub registration: RegistrationDetails,
    pub merkle_proof: Proof,
}

impl<T> IssuedCertificate<T> {
    /// Attach the proof for `registration.leaf_index` in `tree`.
    ///
    /// The leaf at that index must already hold the certificate's leaf hash.
    pub fn from_tree(
        certificate: Certificate<T>,
        registration: RegistrationDetails,
        tree: &Tree,
    ) -> CertificateResult<Self> {
        let index = registration.leaf_index;
        let found = tree.leaf(index)?;
        if &found != certificate.leaf_hash() {
            return Err(CertificateError::LeafMismatch {
                index,
                expected: *certificate.leaf_hash(),
                found,
            });
        }

        let merkle_proof = tree.proof(index)?;
        debug!(did = certificate.did(), index, "attached inclusion proof");
        Ok(Self {
            certificate,
            registration,
            merkle_proof,
        })
    }

    /// Check the proof against the certificate's leaf hash.
    pub fn verify_inclusion(&self) -> CertificateResult<bool> {
        self.merkle_proof
            .verify(self.certificate.leaf_hash())
            .map_err(CertificateError::LeafHash)
    }
}
