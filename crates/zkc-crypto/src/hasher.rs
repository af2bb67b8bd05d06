use std::sync::OnceLock;

use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonBytesHasher};
use sha3::{Digest, Keccak256};
use tracing::debug;
use zkc_types::FieldElement;

use crate::error::HashError;

/// Largest arity the circom Poseidon parameter set supports here.
pub const MAX_ARITY: usize = 12;

/// Domain-separation seed for the empty-leaf value.
pub const EMPTY_LEAF_SEED: &[u8] = b"Galactica";

/// Poseidon hash of an ordered sequence of field elements.
///
/// Uses the circom/iden3 parameter set over the BN254 scalar field, so the
/// output matches what the registry circuits compute. Inputs travel through
/// the permutation in their canonical big-endian form and the 32-byte output
/// is decoded strictly.
pub fn poseidon(inputs: &[FieldElement]) -> Result<FieldElement, HashError> {
    if inputs.is_empty() || inputs.len() > MAX_ARITY {
        return Err(HashError::ComputationFailed(format!(
            "unsupported arity {}, expected 1..={MAX_ARITY}",
            inputs.len()
        )));
    }

    let mut hasher = Poseidon::<Fr>::new_circom(inputs.len())
        .map_err(|e| HashError::ComputationFailed(e.to_string()))?;

    let encoded: Vec<[u8; 32]> = inputs.iter().map(FieldElement::to_be_bytes).collect();
    let slices: Vec<&[u8]> = encoded.iter().map(|b| b.as_slice()).collect();

    let digest = hasher
        .hash_bytes_be(&slices)
        .map_err(|e| HashError::ComputationFailed(e.to_string()))?;

    FieldElement::from_canonical_be_bytes(&digest).map_err(|_| HashError::InvalidEncoding)
}

/// Poseidon of two elements: the tree's node combiner.
pub fn poseidon_pair(left: &FieldElement, right: &FieldElement) -> Result<FieldElement, HashError> {
    poseidon(&[*left, *right])
}

/// Derive an empty-leaf value from a seed: Keccak-256 of the seed, read as
/// a big-endian integer and reduced modulo the field prime.
pub fn empty_leaf_value_for_seed(seed: &[u8]) -> FieldElement {
    let digest = Keccak256::digest(seed);
    FieldElement::from_be_bytes_mod_order(&digest)
}

/// The process-wide empty-leaf value, derived from [`EMPTY_LEAF_SEED`] on
/// first use.
pub fn empty_leaf_value() -> FieldElement {
    static EMPTY_LEAF: OnceLock<FieldElement> = OnceLock::new();
    *EMPTY_LEAF.get_or_init(|| {
        let value = empty_leaf_value_for_seed(EMPTY_LEAF_SEED);
        debug!(%value, "derived empty leaf value");
        value
    })
}
