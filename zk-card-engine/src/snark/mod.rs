//! The Groth16 proof service: circuit input assembly, the prover seam,
//! the proof-validity sentinel, and the byte encodings the on-ledger
//! verifier expects.
//!
//! The circuits themselves (shuffle-encrypt and partial decryption) are
//! external artifacts; this module owns only their input/output contract.
//! Proof generation takes seconds for a 52-card shuffle and is expected
//! to run on a blocking worker, never on the interaction path.

pub mod encoding;
pub mod mock;

use ark_bls12_381::{G1Affine, G2Affine};
use ark_ff::One;
use serde::{Deserialize, Serialize};
use shuffle_essentials::curve::{Fq, Fr, ProjectivePoint};
use shuffle_essentials::homomorphic_encryption::el_gamal::Ciphertext;
use zeroize::Zeroize;

use crate::error::ProofError;

const LOG_TARGET: &str = "zk_card_engine::snark";

/// Groth16 proof group elements on the pairing curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnarkProof {
    pub pi_a: G1Affine,
    pub pi_b: G2Affine,
    pub pi_c: G1Affine,
}

/// A proof together with its public signals. `public_signals[0]` is the
/// validity sentinel: anything other than 1 marks the bundle unusable.
#[derive(Clone, Debug)]
pub struct ProofBundle {
    pub proof: SnarkProof,
    pub public_signals: Vec<Fq>,
}

/// Input contract of the shuffle-encrypt circuit. Every scalar is carried
/// as its decimal field-string; decks are the packed six-row layout
/// (`c0.X`, `c0.Y`, `c0.Z`, `c1.X`, `c1.Y`, `c1.Z`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShuffleEncryptInput {
    pub pk: [String; 3],
    #[serde(rename = "R")]
    pub r: Vec<String>,
    pub original: Vec<Vec<String>>,
    pub permuted: Vec<Vec<String>>,
}

/// Input contract of the partial-decryption circuit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecryptInput {
    pub c0: [String; 3],
    pub sk: String,
    pub expected: [String; 3],
}

impl Drop for DecryptInput {
    fn drop(&mut self) {
        self.sk.zeroize();
    }
}

/// Seam to the external Groth16 prover. Implementations load the real
/// circuit artifacts; [`mock::MockProver`] evaluates the relation
/// natively for tests and local development.
pub trait SnarkProver: Send + Sync {
    fn prove_shuffle(&self, input: &ShuffleEncryptInput) -> Result<ProofBundle, ProofError>;
    fn prove_decryption(&self, input: &DecryptInput) -> Result<ProofBundle, ProofError>;
}

/// Wraps a prover with the sentinel check. A bundle that fails the check
/// never reaches the caller intact, so it cannot be submitted.
pub struct ProofService<P> {
    prover: P,
}

impl<P: SnarkProver> ProofService<P> {
    pub fn new(prover: P) -> Self {
        Self { prover }
    }

    pub fn prove_shuffle(&self, input: &ShuffleEncryptInput) -> Result<ProofBundle, ProofError> {
        let bundle = self.prover.prove_shuffle(input)?;
        ensure_valid_sentinel(&bundle)?;
        tracing::debug!(target: LOG_TARGET, signals = bundle.public_signals.len(), "shuffle proof accepted");
        Ok(bundle)
    }

    pub fn prove_partial_decryption(&self, input: &DecryptInput) -> Result<ProofBundle, ProofError> {
        let bundle = self.prover.prove_decryption(input)?;
        ensure_valid_sentinel(&bundle)?;
        tracing::debug!(target: LOG_TARGET, signals = bundle.public_signals.len(), "decryption proof accepted");
        Ok(bundle)
    }
}

fn ensure_valid_sentinel(bundle: &ProofBundle) -> Result<(), ProofError> {
    match bundle.public_signals.first() {
        Some(signal) if *signal == Fq::one() => Ok(()),
        _ => {
            tracing::warn!(target: LOG_TARGET, "proof bundle failed the validity sentinel");
            Err(ProofError::InvalidProof)
        }
    }
}

/// Assemble the shuffle circuit input from native protocol values.
pub fn build_shuffle_input(
    aggregate_key: &ProjectivePoint,
    original: &[Ciphertext],
    permuted: &[Ciphertext],
    scalars: &[Fr],
) -> ShuffleEncryptInput {
    ShuffleEncryptInput {
        pk: encoding::point_to_strings(aggregate_key),
        r: scalars.iter().map(encoding::fr_to_decimal).collect(),
        original: encoding::deck_to_rows(original),
        permuted: encoding::deck_to_rows(permuted),
    }
}

/// Assemble the partial-decryption circuit input.
pub fn build_decrypt_input(
    c0: &ProjectivePoint,
    sk: &Fr,
    expected: &ProjectivePoint,
) -> DecryptInput {
    DecryptInput {
        c0: encoding::point_to_strings(c0),
        sk: encoding::fr_to_decimal(sk),
        expected: encoding::point_to_strings(expected),
    }
}
