use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zkc_crypto::{poseidon, verify_signature, HashError, PublicKey, Signature};
use zkc_types::{FieldElement, Standard, Timestamp};

use crate::content::Content;
use crate::error::{CertificateError, CertificateResult};
use crate::provider::ProviderData;

/// A zero-knowledge certificate.
///
/// Immutable once built: every field is derived by [`Certificate::new`] or
/// decoded from its wire form, and only getters are exposed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate<T> {
    holder_commitment: FieldElement,
    leaf_hash: FieldElement,
    did: String,
    #[serde(rename = "zkCertStandard")]
    standard: Standard,
    content: T,
    content_hash: FieldElement,
    expiration_date: Timestamp,
    #[serde(rename = "providerData")]
    provider: ProviderData,
    random_salt: i64,
}

impl<T: Content> Certificate<T> {
    /// Bind `content` to a holder commitment under a provider signature.
    ///
    /// Fails with [`CertificateError::InvalidSignature`] unless the
    /// signature verifies over `(content hash, holder commitment)`.
    pub fn new(
        holder_commitment: FieldElement,
        content: T,
        provider_public_key: &PublicKey,
        provider_signature: &Signature,
        salt: i64,
        expiration_date: Timestamp,
    ) -> CertificateResult<Self> {
        let content_hash = content.hash().map_err(CertificateError::ContentHash)?;

        let valid = verify_signature(
            provider_public_key,
            &content_hash,
            &holder_commitment,
            provider_signature,
        )
        .map_err(CertificateError::SignatureHash)?;
        if !valid {
            warn!(%content_hash, %holder_commitment, "provider signature rejected");
            return Err(CertificateError::InvalidSignature);
        }

        let leaf_hash = leaf_hash(
            &content_hash,
            provider_public_key,
            provider_signature,
            &holder_commitment,
            salt,
            &expiration_date,
        )
        .map_err(CertificateError::LeafHash)?;

        let standard = content.standard();
        let did = did(&standard, &leaf_hash);
        debug!(%did, "built certificate");

        Ok(Self {
            holder_commitment,
            leaf_hash,
            did,
            standard,
            content,
            content_hash,
            expiration_date,
            provider: ProviderData::new(*provider_public_key, *provider_signature),
            random_salt: salt,
        })
    }

    /// Re-derive every bound value of a decoded certificate and check it
    /// against what was stored.
    pub fn validate(&self) -> CertificateResult<()> {
        let content_hash = self.content.hash().map_err(CertificateError::ContentHash)?;
        if content_hash != self.content_hash {
            return Err(CertificateError::BindingMismatch {
                field: "contentHash",
            });
        }
        if self.content.standard() != self.standard {
            return Err(CertificateError::BindingMismatch {
                field: "zkCertStandard",
            });
        }

        let valid = verify_signature(
            &self.provider.public_key,
            &self.content_hash,
            &self.holder_commitment,
            &self.provider.signature,
        )
        .map_err(CertificateError::SignatureHash)?;
        if !valid {
            return Err(CertificateError::InvalidSignature);
        }

        let leaf = leaf_hash(
            &self.content_hash,
            &self.provider.public_key,
            &self.provider.signature,
            &self.holder_commitment,
            self.random_salt,
            &self.expiration_date,
        )
        .map_err(CertificateError::LeafHash)?;
        if leaf != self.leaf_hash {
            return Err(CertificateError::BindingMismatch { field: "leafHash" });
        }
        if did(&self.standard, &self.leaf_hash) != self.did {
            return Err(CertificateError::BindingMismatch { field: "did" });
        }
        Ok(())
    }
}

impl<T> Certificate<T> {
    pub fn holder_commitment(&self) -> &FieldElement {
        &self.holder_commitment
    }

    pub fn leaf_hash(&self) -> &FieldElement {
        &self.leaf_hash
    }

    pub fn did(&self) -> &str {
        &self.did
    }

    pub fn standard(&self) -> &Standard {
        &self.standard
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn content_hash(&self) -> &FieldElement {
        &self.content_hash
    }

    pub fn expiration_date(&self) -> &Timestamp {
        &self.expiration_date
    }

    pub fn provider(&self) -> &ProviderData {
        &self.provider
    }

    pub fn random_salt(&self) -> i64 {
        self.random_salt
    }
}

/// The certificate leaf hash: Poseidon over nine inputs in this fixed order:
/// content hash, public key x and y, signature S, R8 x and y, holder
/// commitment, salt, expiration in unix seconds.
///
/// The salt and expiration are signed; negative values are bound as their
/// residue modulo the field prime.
pub fn leaf_hash(
    content_hash: &FieldElement,
    public_key: &PublicKey,
    signature: &Signature,
    holder_commitment: &FieldElement,
    salt: i64,
    expiration_date: &Timestamp,
) -> Result<FieldElement, HashError> {
    let salt = FieldElement::from_i64_mod_order(salt);
    let expiration = expiration_date.to_field_element();

    poseidon(&[
        *content_hash,
        *public_key.x(),
        *public_key.y(),
        signature.s,
        signature.r8.x,
        signature.r8.y,
        *holder_commitment,
        salt,
        expiration,
    ])
}

/// `did:<standard>:<decimal leaf hash>`.
pub fn did(standard: &Standard, leaf_hash: &FieldElement) -> String {
    format!("did:{standard}:{leaf_hash}")
}
