//! EdDSA over BabyJubJub with a Poseidon challenge.
//!
//! Keys, signatures and verification follow iden3's `babyjub` package: the
//! secret is expanded with BLAKE-512, nonces are derived from the second half
//! of that expansion and the message, and verification checks
//! `S·B8 == R8 + 8·H(R8, A, m)·A`. A provider secret produces the same public
//! key and the same signatures here as under iden3 tooling.

use blake_hash::{Blake512, Digest};
use num_bigint::BigUint;
use rand::RngCore;
use zkc_types::FieldElement;

use crate::babyjub::{subgroup_order, Point};
use crate::error::{HashError, KeyError};
use crate::hasher::poseidon;

/// BabyJubJub private key (32-byte secret).
#[derive(Clone)]
pub struct PrivateKey([u8; 32]);

/// BabyJubJub public key `A = s·B8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey(Point);

/// EdDSA-Poseidon signature `(R8, S)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub r8: Point,
    pub s: FieldElement,
}

impl PrivateKey {
    /// Generate a new random private key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from a raw 32-byte secret.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a 64-character hex secret.
    pub fn from_hex(text: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(text.trim().trim_start_matches("0x"))
            .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            KeyError::InvalidPrivateKey(format!("expected 32 bytes, got {}", b.len()))
        })?;
        Ok(Self(bytes))
    }

    /// Raw secret bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The corresponding public key.
    pub fn public(&self) -> PublicKey {
        PublicKey(Point::base8().mul_scalar(&self.scalar()))
    }

    /// Sign a field element.
    pub fn sign_poseidon(&self, message: &FieldElement) -> Result<Signature, HashError> {
        let order = subgroup_order();
        let expanded = self.expand();

        let mut nonce_hasher = Blake512::new();
        nonce_hasher.update(&expanded[32..]);
        nonce_hasher.update(message.to_le_bytes());
        let r = BigUint::from_bytes_le(&nonce_hasher.finalize()) % &order;

        let r8 = Point::base8().mul_scalar(&r);
        let public = self.public();
        let challenge = challenge(&r8, &public, message)?;

        let s = (r + challenge.to_biguint() * (self.scalar() << 3u32)) % &order;
        Ok(Signature {
            r8,
            s: FieldElement::from_biguint_mod_order(&s),
        })
    }

    /// 64 bytes of key material; the first half feeds the scalar, the
    /// second half the nonce.
    fn expand(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out.copy_from_slice(&Blake512::digest(&self.0));
        out
    }

    /// Pruned secret scalar, already divided by the cofactor.
    fn scalar(&self) -> BigUint {
        let expanded = self.expand();
        let mut buf = [0u8; 32];
        buf.copy_from_slice(&expanded[..32]);
        buf[0] &= 0xF8;
        buf[31] &= 0x7F;
        buf[31] |= 0x40;
        BigUint::from_bytes_le(&buf) >> 3u32
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey(<redacted>)")
    }
}

impl PublicKey {
    /// Wrap a curve point. Off-curve points are accepted here and simply
    /// never verify.
    pub fn new(point: Point) -> Self {
        Self(point)
    }

    pub fn point(&self) -> &Point {
        &self.0
    }

    pub fn x(&self) -> &FieldElement {
        &self.0.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.0.y
    }

    /// Verify a signature over a field element.
    ///
    /// Returns `Ok(false)` for any signature that does not validate,
    /// including off-curve points and `S` outside the subgroup order. Errors
    /// only when the challenge hash cannot be computed.
    pub fn verify_poseidon(
        &self,
        message: &FieldElement,
        signature: &Signature,
    ) -> Result<bool, HashError> {
        if !self.0.is_on_curve() || !signature.r8.is_on_curve() {
            return Ok(false);
        }
        let s = signature.s.to_biguint();
        if s >= subgroup_order() {
            return Ok(false);
        }

        let challenge = challenge(&signature.r8, self, message)?;
        let left = Point::base8().mul_scalar(&s);
        let right = signature
            .r8
            .add_point(&self.0.mul_scalar(&(challenge.to_biguint() << 3u32)));
        Ok(left == right)
    }
}

fn challenge(
    r8: &Point,
    public: &PublicKey,
    message: &FieldElement,
) -> Result<FieldElement, HashError> {
    poseidon(&[r8.x, r8.y, *public.x(), *public.y(), *message])
}
