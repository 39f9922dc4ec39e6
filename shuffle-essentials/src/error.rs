use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CryptoError {
    #[error("{0} proof verification failed")]
    ProofVerificationError(String),

    #[error("cannot invert zero in the coordinate field")]
    ZeroInversion,

    #[error("mapping of length {0} is not a permutation")]
    InvalidPermutation(usize),
}
