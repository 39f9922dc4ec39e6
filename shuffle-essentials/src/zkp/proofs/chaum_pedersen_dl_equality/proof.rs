use crate::error::CryptoError;

use super::{Parameters, Statement};

use crate::curve::{Fr, ProjectivePoint};
use crate::utils::rand::FiatShamirRng;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::UniformRand;
use digest::Digest;

#[derive(Clone, Copy, PartialEq, Eq, Debug, CanonicalDeserialize, CanonicalSerialize)]
pub struct Proof {
    pub(crate) a: ProjectivePoint,
    pub(crate) b: ProjectivePoint,
    pub(crate) r: Fr,
}

impl Proof {
    pub fn verify<D: Digest>(
        &self,
        parameters: &Parameters,
        statement: &Statement,
        fs_rng: &mut FiatShamirRng<D>,
    ) -> Result<(), CryptoError> {
        fs_rng.absorb_bytes(b"chaum_pedersen");
        fs_rng.absorb(&parameters.g);
        fs_rng.absorb(&parameters.h);
        fs_rng.absorb(&statement.0);
        fs_rng.absorb(&statement.1);
        fs_rng.absorb(&self.a);
        fs_rng.absorb(&self.b);

        let c = Fr::rand(fs_rng);

        // g * r ==? a + x*c
        if parameters.g.mul_scalar(&self.r) != self.a.add(&statement.0.mul_scalar(&c)) {
            return Err(CryptoError::ProofVerificationError(String::from(
                "Chaum-Pedersen",
            )));
        }

        // h * r ==? b + y*c
        if parameters.h.mul_scalar(&self.r) != self.b.add(&statement.1.mul_scalar(&c)) {
            return Err(CryptoError::ProofVerificationError(String::from(
                "Chaum-Pedersen",
            )));
        }

        Ok(())
    }
}
