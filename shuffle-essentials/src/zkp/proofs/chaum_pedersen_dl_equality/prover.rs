use crate::error::CryptoError;

use super::proof::Proof;
use super::{Parameters, Statement, Witness};

use crate::curve::Fr;
use crate::utils::rand::FiatShamirRng;
use ark_std::rand::Rng;
use ark_std::UniformRand;
use digest::Digest;

pub struct Prover;

impl Prover {
    pub fn create_proof<R: Rng, D: Digest>(
        rng: &mut R,
        parameters: &Parameters,
        statement: &Statement,
        witness: &Witness,
        fs_rng: &mut FiatShamirRng<D>,
    ) -> Result<Proof, CryptoError> {
        fs_rng.absorb_bytes(b"chaum_pedersen");
        fs_rng.absorb(&parameters.g);
        fs_rng.absorb(&parameters.h);
        fs_rng.absorb(&statement.0);
        fs_rng.absorb(&statement.1);

        let omega = Fr::rand(rng);
        let a = parameters.g.mul_scalar(&omega);
        let b = parameters.h.mul_scalar(&omega);

        fs_rng.absorb(&a);
        fs_rng.absorb(&b);

        let c = Fr::rand(fs_rng);

        let r = omega + c * *witness;

        Ok(Proof { a, b, r })
    }
}
