use crate::curve::{Fr, ProjectivePoint};
use crate::error::CryptoError;
use crate::utils::rand::FiatShamirRng;
use crate::zkp::ArgumentOfKnowledge;
use ark_std::rand::Rng;
use digest::Digest;

pub mod proof;
pub mod prover;

pub use proof::Proof;

/// Argument of knowledge of a scalar `w` such that `statement.0 = w*g` and
/// `statement.1 = w*h` for public bases `g`, `h`.
pub struct DLEquality;

/// Common reference string: the two bases.
#[derive(Copy, Clone, Debug)]
pub struct Parameters {
    pub g: ProjectivePoint,
    pub h: ProjectivePoint,
}

impl Parameters {
    pub fn new(g: ProjectivePoint, h: ProjectivePoint) -> Self {
        Self { g, h }
    }
}

/// Claimed images `(w*g, w*h)`.
#[derive(Copy, Clone, Debug)]
pub struct Statement(pub ProjectivePoint, pub ProjectivePoint);

impl Statement {
    pub fn new(a: ProjectivePoint, b: ProjectivePoint) -> Self {
        Self(a, b)
    }
}

pub type Witness = Fr;

impl ArgumentOfKnowledge for DLEquality {
    type CommonReferenceString = Parameters;
    type Statement = Statement;
    type Witness = Witness;
    type Proof = Proof;

    fn prove<R: Rng, D: Digest>(
        rng: &mut R,
        common_reference_string: &Self::CommonReferenceString,
        statement: &Self::Statement,
        witness: &Self::Witness,
        fs_rng: &mut FiatShamirRng<D>,
    ) -> Result<Self::Proof, CryptoError> {
        prover::Prover::create_proof(rng, common_reference_string, statement, witness, fs_rng)
    }

    fn verify<D: Digest>(
        common_reference_string: &Self::CommonReferenceString,
        statement: &Self::Statement,
        proof: &Self::Proof,
        fs_rng: &mut FiatShamirRng<D>,
    ) -> Result<(), CryptoError> {
        proof.verify(common_reference_string, statement, fs_rng)
    }
}
