use tracing::debug;
use zkc_types::FieldElement;

use crate::eddsa::{PrivateKey, PublicKey, Signature};
use crate::error::HashError;
use crate::hasher::poseidon_pair;

/// The message a provider signs for a certificate:
/// `Poseidon(contentHash, commitmentHash)`.
pub fn certificate_message(
    content_hash: &FieldElement,
    commitment_hash: &FieldElement,
) -> Result<FieldElement, HashError> {
    poseidon_pair(content_hash, commitment_hash)
}

/// Sign a certificate's content hash bound to a holder commitment.
pub fn sign_certificate(
    provider_key: &PrivateKey,
    content_hash: &FieldElement,
    commitment_hash: &FieldElement,
) -> Result<Signature, HashError> {
    let message = certificate_message(content_hash, commitment_hash)?;
    provider_key.sign_poseidon(&message)
}

/// Verify a provider signature over `(contentHash, commitmentHash)`.
///
/// An invalid signature is `Ok(false)`; only a failing hash is an error.
pub fn verify_signature(
    provider_key: &PublicKey,
    content_hash: &FieldElement,
    commitment_hash: &FieldElement,
    signature: &Signature,
) -> Result<bool, HashError> {
    let message = certificate_message(content_hash, commitment_hash)?;
    let valid = provider_key.verify_poseidon(&message, signature)?;
    debug!(%message, valid, "verified certificate signature");
    Ok(valid)
}
