use std::fmt;
use std::str::FromStr;

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField, Zero};
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Width of the canonical big-endian byte encoding.
pub const FIELD_BYTES: usize = 32;

/// An element of the BN254 scalar field.
///
/// This is the prime field in which Poseidon operates and over which the
/// BabyJubJub curve is defined, so tree nodes, content hashes, commitments,
/// curve coordinates and signatures all share this one type.
///
/// The value is always canonically reduced. Its text form is the decimal
/// string of that reduced value, with no sign and no leading zeros.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldElement(Fr);

impl FieldElement {
    /// The additive identity.
    pub fn zero() -> Self {
        Self(Fr::zero())
    }

    /// Returns `true` for the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Lift an unsigned integer into the field.
    pub fn from_u64(value: u64) -> Self {
        Self(Fr::from(value))
    }

    /// Lift a signed integer into the field, reducing negative values
    /// modulo the prime (`-1` becomes `p - 1`).
    pub fn from_i64_mod_order(value: i64) -> Self {
        let magnitude = Fr::from(value.unsigned_abs());
        if value < 0 {
            Self(-magnitude)
        } else {
            Self(magnitude)
        }
    }

    /// Interpret `bytes` as a big-endian integer and reduce it modulo the
    /// field prime.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(Fr::from_be_bytes_mod_order(bytes))
    }

    /// Decode a 32-byte big-endian integer that must already be reduced.
    pub fn from_canonical_be_bytes(bytes: &[u8; FIELD_BYTES]) -> Result<Self, TypeError> {
        Self::from_biguint(&BigUint::from_bytes_be(bytes))
    }

    /// Convert an integer that must already be reduced.
    pub fn from_biguint(value: &BigUint) -> Result<Self, TypeError> {
        if *value >= Self::modulus() {
            return Err(TypeError::NonCanonical(value.to_string()));
        }
        Ok(Self::from_biguint_mod_order(value))
    }

    /// Convert any integer, reducing it modulo the field prime.
    pub fn from_biguint_mod_order(value: &BigUint) -> Self {
        Self(Fr::from_le_bytes_mod_order(&value.to_bytes_le()))
    }

    /// Parse the canonical decimal text form.
    ///
    /// Rejects empty input, signs, non-digit characters, leading zeros and
    /// values at or above the modulus, so parsing then printing is exact.
    pub fn parse_decimal(text: &str) -> Result<Self, TypeError> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::MalformedEncoding(format!(
                "not a decimal integer: {text:?}"
            )));
        }
        if text.len() > 1 && text.starts_with('0') {
            return Err(TypeError::MalformedEncoding(format!(
                "leading zeros in {text:?}"
            )));
        }
        let value = BigUint::parse_bytes(text.as_bytes(), 10).ok_or_else(|| {
            TypeError::MalformedEncoding(format!("not a decimal integer: {text:?}"))
        })?;
        Self::from_biguint(&value)
    }

    /// The canonical value as an arbitrary-precision integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.0.into_bigint().to_bytes_le())
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; FIELD_BYTES] {
        let mut out = [0u8; FIELD_BYTES];
        let bytes = self.0.into_bigint().to_bytes_be();
        out[FIELD_BYTES - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    /// Canonical 32-byte little-endian encoding.
    pub fn to_le_bytes(&self) -> [u8; FIELD_BYTES] {
        let mut out = self.to_be_bytes();
        out.reverse();
        out
    }

    /// The field prime.
    pub fn modulus() -> BigUint {
        BigUint::from_bytes_le(&Fr::MODULUS.to_bytes_le())
    }

    /// The underlying arkworks element.
    pub fn inner(&self) -> &Fr {
        &self.0
    }
}

impl From<Fr> for FieldElement {
    fn from(value: Fr) -> Self {
        Self(value)
    }
}

impl From<FieldElement> for Fr {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl FromStr for FieldElement {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_decimal(s)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self})")
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_decimal(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MODULUS_DEC: &str =
        "21888242871839275222246405745257275088548364400416034343698204186575808495617";

    #[test]
    fn modulus_is_bn254_scalar_prime() {
        assert_eq!(FieldElement::modulus().to_string(), MODULUS_DEC);
    }

    #[test]
    fn zero_prints_as_single_digit() {
        assert_eq!(FieldElement::zero().to_string(), "0");
        assert_eq!(FieldElement::parse_decimal("0").unwrap(), FieldElement::zero());
    }

    #[test]
    fn decimal_roundtrip_is_exact() {
        let max = (FieldElement::modulus() - 1u32).to_string();
        for text in ["1", "42", "18446744073709551616", max.as_str()] {
            let fe = FieldElement::parse_decimal(text).unwrap();
            assert_eq!(fe.to_string(), text);
        }
    }

    #[test]
    fn rejects_non_decimal_input() {
        for text in ["", "-1", "+1", "0x10", "12a", " 7", "1_000", "007"] {
            assert!(
                matches!(
                    FieldElement::parse_decimal(text),
                    Err(TypeError::MalformedEncoding(_))
                ),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_values_at_or_above_modulus() {
        assert!(matches!(
            FieldElement::parse_decimal(MODULUS_DEC),
            Err(TypeError::NonCanonical(_))
        ));
    }

    #[test]
    fn negative_integers_wrap_around_the_modulus() {
        assert_eq!(FieldElement::from_i64_mod_order(5), FieldElement::from_u64(5));
        assert_eq!(
            FieldElement::from_i64_mod_order(-1).to_biguint(),
            FieldElement::modulus() - 1u32
        );
        assert_eq!(
            FieldElement::from_i64_mod_order(i64::MIN).to_biguint(),
            FieldElement::modulus() - (1u64 << 63)
        );
    }

    #[test]
    fn mod_order_reduction_wraps() {
        let p_plus_three = FieldElement::modulus() + 3u32;
        let fe = FieldElement::from_be_bytes_mod_order(&p_plus_three.to_bytes_be());
        assert_eq!(fe, FieldElement::from_u64(3));
    }

    #[test]
    fn canonical_bytes_roundtrip() {
        let fe = FieldElement::parse_decimal("123456789012345678901234567890").unwrap();
        let be = fe.to_be_bytes();
        assert_eq!(FieldElement::from_canonical_be_bytes(&be).unwrap(), fe);
        let mut le = fe.to_le_bytes();
        le.reverse();
        assert_eq!(le, be);
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let fe = FieldElement::from_u64(1234);
        let json = serde_json::to_string(&fe).unwrap();
        assert_eq!(json, "\"1234\"");
        let parsed: FieldElement = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, fe);
        assert!(serde_json::from_str::<FieldElement>("1234").is_err());
    }

    proptest! {
        #[test]
        fn u64_text_roundtrip(v in any::<u64>()) {
            let fe = FieldElement::from_u64(v);
            prop_assert_eq!(fe.to_string(), v.to_string());
            prop_assert_eq!(fe.to_string().parse::<FieldElement>().unwrap(), fe);
        }
    }
}
