//! Client-side engine for a mental-poker card game settled on a public
//! ledger. Mutually distrusting players jointly shuffle and deal an
//! ElGamal-encrypted deck, prove each shuffle is a valid permutation
//! through an external Groth16 circuit, and reveal individual cards via
//! verifiable partial decryptions.
//!
//! The crate is organised around the task loop: [`task::TaskOrchestrator`]
//! consumes shuffle/decrypt assignments from the off-chain coordinator,
//! drives [`shuffle`] or [`reveal`], hands witnesses to [`snark`] for
//! proving and ledger encoding, and submits the result payload back.

pub mod cards;
pub mod error;
pub mod keys;
pub mod reveal;
pub mod shuffle;
pub mod snark;
pub mod task;

pub use cards::{Card, CardMap, Rank, Suit, DECK_SIZE};
pub use error::{DecodeError, KeyError, ProofError, RevealError, TaskError};
pub use keys::{KeyManager, KeyPair};
