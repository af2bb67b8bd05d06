//! BabyJubJub curve points in iden3 coordinates.
//!
//! The registry, its circuits and its wire format all use the twisted
//! Edwards form `168700·x² + y² = 1 + 168696·x²·y²` over the BN254 scalar
//! field. arkworks implements the same curve in the isomorphic `a = 1` form,
//! reached by scaling `x` by `√168700`. Points cross that boundary only
//! inside this module; everything outside sees iden3 coordinates.

use ark_ec::{AffineRepr, CurveGroup};
use ark_ed_on_bn254::{EdwardsAffine, Fq, Fr as SubgroupScalar};
use ark_ff::{BigInteger, MontFp, PrimeField};
use num_bigint::BigUint;
use zkc_types::FieldElement;

use crate::error::KeyError;

/// `√168700` in the base field.
const SQRT_A: Fq =
    MontFp!("7214280148105020021932206872019688659210616427216992810330019057549499971851");

/// `1 / √168700` in the base field.
const INV_SQRT_A: Fq =
    MontFp!("2957874849018779266517920829765869116077630550401372566248359756137677864698");

const BASE8_X: Fq =
    MontFp!("5299619240641551281634865583518297030282874472190772894086521144482721001553");
const BASE8_Y: Fq =
    MontFp!("16950150798460657717958625567821834550301663161624707787222815936182638968203");

/// Order of the prime-order subgroup generated by [`Point::base8`].
pub fn subgroup_order() -> BigUint {
    BigUint::from_bytes_le(&SubgroupScalar::MODULUS.to_bytes_le())
}

/// An affine BabyJubJub point in iden3 coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: FieldElement,
    pub y: FieldElement,
}

impl Point {
    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        Self { x, y }
    }

    /// Build a point, rejecting coordinates that are off the curve.
    pub fn try_new(x: FieldElement, y: FieldElement) -> Result<Self, KeyError> {
        let point = Self::new(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(KeyError::NotOnCurve)
        }
    }

    /// The neutral element `(0, 1)`.
    pub fn identity() -> Self {
        Self::new(FieldElement::zero(), FieldElement::from_u64(1))
    }

    /// The EdDSA base point B8, eight times the curve generator.
    pub fn base8() -> Self {
        Self::new(from_fq(BASE8_X), from_fq(BASE8_Y))
    }

    pub fn is_on_curve(&self) -> bool {
        self.to_affine().is_on_curve()
    }

    /// On the curve and inside the prime-order subgroup.
    pub fn is_in_subgroup(&self) -> bool {
        let affine = self.to_affine();
        affine.is_on_curve() && affine.is_in_correct_subgroup_assuming_on_curve()
    }

    /// Group addition.
    pub fn add_point(&self, other: &Self) -> Self {
        let sum = self.to_affine().into_group() + other.to_affine().into_group();
        Self::from_affine(sum.into_affine())
    }

    /// Scalar multiplication by an arbitrary non-negative integer.
    pub fn mul_scalar(&self, scalar: &BigUint) -> Self {
        let limbs = scalar.to_u64_digits();
        Self::from_affine(self.to_affine().mul_bigint(&limbs[..]).into_affine())
    }

    fn to_affine(&self) -> EdwardsAffine {
        EdwardsAffine::new_unchecked(to_fq(&self.x) * SQRT_A, to_fq(&self.y))
    }

    fn from_affine(point: EdwardsAffine) -> Self {
        Self::new(from_fq(point.x * INV_SQRT_A), from_fq(point.y))
    }
}

fn to_fq(value: &FieldElement) -> Fq {
    Fq::from_le_bytes_mod_order(&value.to_le_bytes())
}

fn from_fq(value: Fq) -> FieldElement {
    FieldElement::from_be_bytes_mod_order(&value.into_bigint().to_bytes_be())
}
