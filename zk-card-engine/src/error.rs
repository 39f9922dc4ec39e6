use shuffle_essentials::error::CryptoError;
use thiserror::Error;

/// Failures of the SNARK proof service.
#[derive(Error, Debug)]
pub enum ProofError {
    /// The prover returned a bundle whose first public signal is not 1.
    /// Such a bundle must never be submitted.
    #[error("prover output rejected by the validity sentinel")]
    InvalidProof,

    #[error("prover backend failure: {0}")]
    Backend(String),

    #[error("malformed circuit input: {0}")]
    MalformedInput(String),
}

/// Decode failures at the wire boundary. Raised before any curve
/// arithmetic touches externally supplied data.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("expected {expected} elements, got {got}")]
    BadLength { expected: usize, got: usize },

    #[error("invalid decimal field element `{0}`")]
    BadFieldElement(String),

    #[error("invalid hex string: {0}")]
    BadHex(#[from] hex::FromHexError),

    #[error("hex value has wrong width: expected {expected} bytes, got {got}")]
    BadHexWidth { expected: usize, got: usize },

    #[error("coordinates do not lie on the curve")]
    NotOnCurve,
}

/// Failures while opening a card from partial decryptions.
#[derive(Error, Debug)]
pub enum RevealError {
    /// The combined point matches none of the 52 card points. The
    /// contributions are inconsistent; the disclosure step is aborted.
    #[error("decrypted point does not match any card")]
    UnknownCard,

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Key generation and persistence failures.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("key store i/o failure: {0}")]
    Store(#[from] std::io::Error),

    #[error("malformed key record: {0}")]
    Malformed(String),

    #[error("stored public key does not match the secret scalar")]
    Inconsistent,

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Task-level error taxonomy. Every failure is local to one task and
/// never corrupts the key pair or previously resolved cards.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Retries for a task that was never assigned to this player ran out.
    #[error("task not assigned to this player after {0} attempts")]
    TurnTimeout(u32),

    #[error("task source failure: {0}")]
    Source(String),

    #[error("result submission failed: {0}")]
    Submit(String),

    /// Reshuffling with fresh randomness kept producing invalid proofs.
    #[error("shuffle proof still invalid after {0} attempts")]
    ShuffleAttemptsExhausted(u32),

    #[error("background prover failed: {0}")]
    ProverJoin(String),

    #[error("task carries no payload for its step")]
    EmptyTask,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Proof(#[from] ProofError),

    #[error(transparent)]
    Reveal(#[from] RevealError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
