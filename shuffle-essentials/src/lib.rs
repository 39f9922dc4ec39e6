//! Cryptographic building blocks for the mental-poker card engine:
//! projective twisted Edwards arithmetic on Bandersnatch, rerandomizable
//! ElGamal over its prime subgroup, the Chaum-Pedersen discrete-log
//! equality proof, and the Fiat-Shamir / permutation utilities shared by
//! the protocol crate.

pub mod curve;
pub mod error;
pub mod homomorphic_encryption;
pub mod utils;
pub mod zkp;
