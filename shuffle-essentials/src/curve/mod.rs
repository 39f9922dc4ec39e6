//! Projective arithmetic on the Bandersnatch twisted Edwards curve,
//! `-5x^2 + y^2 = 1 + d x^2 y^2` over the BLS12-381 scalar field.
//!
//! Points are kept in projective coordinates `(X, Y, Z)` with the neutral
//! element `(0, 1, 1)`; two triples denote the same point iff their affine
//! projections agree. The shuffle circuits and the ledger consume exactly
//! this representation, so it is the one canonical in-memory form
//! everywhere in the workspace.

use ark_ff::{Field, MontFp, UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::Rng;

use crate::error::CryptoError;

mod tests;

/// Coordinate field of the curve: the BLS12-381 scalar field.
pub type Fq = ark_bls12_381::Fr;

/// Scalar field: the order of the prime subgroup generated by [`ProjectivePoint::GENERATOR`].
pub type Fr = ark_ed_on_bls12_381_bandersnatch::Fr;

/// Curve coefficient `a = -5`.
pub const COEFF_A: Fq = MontFp!("-5");

/// Curve coefficient `d`.
pub const COEFF_D: Fq =
    MontFp!("45022363124591815672509500913686876175488063829319466900776701791074614335719");

const GENERATOR_X: Fq =
    MontFp!("18886178867200960497001835917649091219057080094937609519140440539760939937304");
const GENERATOR_Y: Fq =
    MontFp!("19188667384257783945677642223292697773471335439753913231509108946878080696678");

/// A curve point in projective coordinates.
#[derive(Clone, Copy, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct ProjectivePoint {
    pub x: Fq,
    pub y: Fq,
    pub z: Fq,
}

/// A normalized point, used where equality must be decided by value
/// (card lookup tables, transcript hashing).
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct AffinePoint {
    pub x: Fq,
    pub y: Fq,
}

impl ProjectivePoint {
    /// The neutral element `(0, 1, 1)`.
    pub const IDENTITY: Self = Self {
        x: Fq::ZERO,
        y: Fq::ONE,
        z: Fq::ONE,
    };

    /// Fixed generator of the prime subgroup.
    pub const GENERATOR: Self = Self {
        x: GENERATOR_X,
        y: GENERATOR_Y,
        z: Fq::ONE,
    };

    pub const fn new(x: Fq, y: Fq, z: Fq) -> Self {
        Self { x, y, z }
    }

    /// Unified projective addition; the same branchless formula serves
    /// addition and doubling.
    pub fn add(&self, other: &Self) -> Self {
        let a = self.z * other.z;
        let b = a.square();
        let c = self.x * other.x;
        let d = self.y * other.y;
        let e = COEFF_D * c * d;
        let f = b - e;
        let g = b + e;

        // (X1 + Y1)(X2 + Y2) - X1X2 - Y1Y2
        let cross = (self.x + self.y) * (other.x + other.y) - c - d;

        Self {
            x: a * f * cross,
            y: a * g * (d - COEFF_A * c),
            z: f * g,
        }
    }

    pub fn double(&self) -> Self {
        self.add(self)
    }

    pub fn neg(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
            z: self.z,
        }
    }

    /// Double-and-add over the scalar bits, least significant first.
    /// The zero scalar yields the neutral element.
    pub fn mul_scalar(&self, n: &Fr) -> Self {
        use ark_ff::{BigInteger, PrimeField};

        let mut acc = Self::IDENTITY;
        let mut base = *self;
        for bit in n.into_bigint().to_bits_le() {
            if bit {
                acc = acc.add(&base);
            }
            base = base.double();
        }
        acc
    }

    /// Whether the triple satisfies the projective curve equation
    /// `a X^2 Z^2 + Y^2 Z^2 = Z^4 + d X^2 Y^2` with `Z != 0`. Checked at
    /// trust boundaries before externally supplied coordinates enter any
    /// other arithmetic.
    pub fn is_on_curve(&self) -> bool {
        if self.z.is_zero() {
            return false;
        }
        let xx = self.x.square();
        let yy = self.y.square();
        let zz = self.z.square();
        COEFF_A * xx * zz + yy * zz == zz.square() + COEFF_D * xx * yy
    }

    /// Normalize to affine coordinates. Fails loudly on a zero `Z`, which
    /// cannot occur for points produced by this module but must be caught
    /// for decoded external input.
    pub fn to_affine(&self) -> Result<AffinePoint, CryptoError> {
        let z_inv = self.z.inverse().ok_or(CryptoError::ZeroInversion)?;
        Ok(AffinePoint {
            x: self.x * z_inv,
            y: self.y * z_inv,
        })
    }
}

impl PartialEq for ProjectivePoint {
    /// Projective class equality: `X1 Z2 == X2 Z1` and `Y1 Z2 == Y2 Z1`.
    fn eq(&self, other: &Self) -> bool {
        self.x * other.z == other.x * self.z && self.y * other.z == other.y * self.z
    }
}

impl Eq for ProjectivePoint {}

impl UniformRand for ProjectivePoint {
    /// A uniformly random element of the prime subgroup.
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let scalar = Fr::rand(rng);
        Self::GENERATOR.mul_scalar(&scalar)
    }
}

impl AffinePoint {
    pub fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x,
            y: self.y,
            z: Fq::ONE,
        }
    }
}
