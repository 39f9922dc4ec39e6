use super::super::Plaintext;

use crate::curve::{Fr, ProjectivePoint};
use ark_std::rand::Rng;
use ark_std::UniformRand;

impl std::ops::Mul<Fr> for Plaintext {
    type Output = Self;

    fn mul(self, x: Fr) -> Self::Output {
        Self(self.0.mul_scalar(&x))
    }
}

impl std::ops::Add<Plaintext> for Plaintext {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.add(&rhs.0))
    }
}

impl UniformRand for Plaintext {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(ProjectivePoint::rand(rng))
    }
}
