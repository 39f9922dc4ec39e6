//! Witness-checking stand-in for the external Groth16 prover.
//!
//! Evaluates the circuit relation natively and reports the outcome
//! through the validity sentinel, exactly as the real prover does when a
//! witness fails its constraints. Proof group elements are derived
//! deterministically from the input transcript so downstream encoders
//! operate on real pairing-curve points. Not a SNARK: nothing here is
//! sound without the real circuit artifacts, so this backend is for tests
//! and local development only.

use ark_bls12_381::{G1Projective, G2Projective};
use ark_ec::{CurveGroup, Group};
use ark_ff::{One, PrimeField, Zero};
use blake2::{Blake2b512, Digest};
use shuffle_essentials::curve::{Fq, Fr, ProjectivePoint};
use shuffle_essentials::homomorphic_encryption::el_gamal::Ciphertext;

use super::{encoding, DecryptInput, ProofBundle, ShuffleEncryptInput, SnarkProof};
use crate::error::{DecodeError, ProofError};

pub struct MockProver;

impl super::SnarkProver for MockProver {
    fn prove_shuffle(&self, input: &ShuffleEncryptInput) -> Result<ProofBundle, ProofError> {
        let aggregate_key = encoding::point_from_strings(&input.pk).map_err(malformed)?;
        let cards = input.r.len();
        let original = encoding::deck_from_rows(&input.original, cards).map_err(malformed)?;
        let permuted = encoding::deck_from_rows(&input.permuted, cards).map_err(malformed)?;
        let scalars = input
            .r
            .iter()
            .map(|s| encoding::fr_from_decimal(s))
            .collect::<Result<Vec<_>, _>>()
            .map_err(malformed)?;

        let valid = shuffle_relation_holds(&aggregate_key, &original, &permuted, &scalars);

        let mut public_signals = vec![sentinel(valid)];
        public_signals.push(aggregate_key.x);
        public_signals.push(aggregate_key.y);
        public_signals.push(aggregate_key.z);
        public_signals.push(rows_digest(&input.original));
        public_signals.push(rows_digest(&input.permuted));

        Ok(ProofBundle {
            proof: transcript_proof(&serialize_input(input)?),
            public_signals,
        })
    }

    fn prove_decryption(&self, input: &DecryptInput) -> Result<ProofBundle, ProofError> {
        let c0 = encoding::point_from_strings(&input.c0).map_err(malformed)?;
        let expected = encoding::point_from_strings(&input.expected).map_err(malformed)?;
        let sk = encoding::fr_from_decimal(&input.sk).map_err(malformed)?;

        let valid = c0.mul_scalar(&sk).neg() == expected;

        let mut public_signals = vec![sentinel(valid)];
        public_signals.extend([c0.x, c0.y, c0.z]);
        public_signals.extend([expected.x, expected.y, expected.z]);

        Ok(ProofBundle {
            proof: transcript_proof(&serialize_input(input)?),
            public_signals,
        })
    }
}

/// Exists a bijection pairing each output slot with a distinct input card
/// such that stripping the slot's rerandomization layer recovers it.
fn shuffle_relation_holds(
    aggregate_key: &ProjectivePoint,
    original: &[Ciphertext],
    permuted: &[Ciphertext],
    scalars: &[Fr],
) -> bool {
    if original.len() != permuted.len() || original.len() != scalars.len() {
        return false;
    }

    let mut used = vec![false; original.len()];
    for (output, r) in permuted.iter().zip(scalars.iter()) {
        let c0 = output.0.add(&ProjectivePoint::GENERATOR.mul_scalar(r).neg());
        let c1 = output.1.add(&aggregate_key.mul_scalar(r).neg());
        let source = original
            .iter()
            .enumerate()
            .position(|(i, candidate)| !used[i] && candidate.0 == c0 && candidate.1 == c1);
        match source {
            Some(i) => used[i] = true,
            None => return false,
        }
    }
    true
}

/// One field element binding a packed deck into the public signals.
fn rows_digest(rows: &[Vec<String>]) -> Fq {
    let mut hasher = Blake2b512::new();
    for row in rows {
        for value in row {
            hasher.update(value.as_bytes());
            hasher.update(b",");
        }
    }
    Fq::from_le_bytes_mod_order(&hasher.finalize()[..32])
}

fn sentinel(valid: bool) -> Fq {
    if valid {
        Fq::one()
    } else {
        Fq::zero()
    }
}

fn malformed(err: DecodeError) -> ProofError {
    ProofError::MalformedInput(err.to_string())
}

fn serialize_input<T: serde::Serialize>(input: &T) -> Result<Vec<u8>, ProofError> {
    serde_json::to_vec(input).map_err(|e| ProofError::Backend(e.to_string()))
}

/// Deterministic pairing-curve elements bound to the input transcript.
fn transcript_proof(transcript: &[u8]) -> SnarkProof {
    let digest = Blake2b512::digest(transcript);
    let a = Fq::from_le_bytes_mod_order(&digest[..32]);
    let b = Fq::from_le_bytes_mod_order(&digest[32..]);

    SnarkProof {
        pi_a: (G1Projective::generator() * a).into_affine(),
        pi_b: (G2Projective::generator() * b).into_affine(),
        pi_c: (G1Projective::generator() * (a + b)).into_affine(),
    }
}
