use crate::curve::{Fr, ProjectivePoint};
use crate::error::CryptoError;
use crate::homomorphic_encryption::HomomorphicEncryptionScheme;

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::Rng;
use ark_std::UniformRand;

pub mod arithmetic_definitions;
mod tests;

#[derive(Clone)]
pub struct ElGamal;

#[derive(Copy, Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct Parameters {
    pub generator: ProjectivePoint,
}

impl Parameters {
    pub fn new() -> Self {
        Self {
            generator: ProjectivePoint::GENERATOR,
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new()
    }
}

pub type PublicKey = ProjectivePoint;

pub type SecretKey = Fr;

#[derive(Clone, Copy, Eq, PartialEq, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct Plaintext(pub ProjectivePoint);

#[derive(Clone, Copy, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct Ciphertext(pub ProjectivePoint, pub ProjectivePoint);

impl HomomorphicEncryptionScheme for ElGamal {
    type Parameters = Parameters;
    type PublicKey = PublicKey;
    type SecretKey = SecretKey;
    type Randomness = Fr;
    type Plaintext = Plaintext;
    type Ciphertext = Ciphertext;

    fn keygen<R: Rng>(
        pp: &Self::Parameters,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey), CryptoError> {
        // get a random element from the scalar field
        let secret_key = Fr::rand(rng);

        // compute secret_key*generator to derive the public key
        let public_key = pp.generator.mul_scalar(&secret_key);

        Ok((public_key, secret_key))
    }

    fn encrypt(
        pp: &Self::Parameters,
        pk: &Self::PublicKey,
        message: &Self::Plaintext,
        r: &Fr,
    ) -> Result<Self::Ciphertext, CryptoError> {
        // compute c0 = r*generator
        let c0 = pp.generator.mul_scalar(r);

        // compute c1 = m + r*pk
        let c1 = message.0.add(&pk.mul_scalar(r));

        Ok(Ciphertext(c0, c1))
    }

    fn rerandomize(
        pp: &Self::Parameters,
        pk: &Self::PublicKey,
        ciphertext: &Self::Ciphertext,
        r: &Fr,
    ) -> Result<Self::Ciphertext, CryptoError> {
        // c0' = c0 + r*generator, c1' = c1 + r*pk
        let c0 = ciphertext.0.add(&pp.generator.mul_scalar(r));
        let c1 = ciphertext.1.add(&pk.mul_scalar(r));

        Ok(Ciphertext(c0, c1))
    }

    fn decrypt(
        _pp: &Self::Parameters,
        sk: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::Plaintext, CryptoError> {
        // compute s = sk * c0
        let s = ciphertext.0.mul_scalar(sk);

        // compute message = c1 - s
        let message = ciphertext.1.add(&s.neg());

        Ok(Plaintext(message))
    }
}

/// Encrypt a vector of plaintexts under one public key, drawing a fresh
/// random scalar per entry. The scalars are returned for proof
/// construction and must be discarded by the caller once the proof is
/// assembled.
pub fn encrypt_vector<R: Rng>(
    pp: &Parameters,
    pk: &PublicKey,
    messages: &[Plaintext],
    rng: &mut R,
) -> Result<(Vec<Ciphertext>, Vec<Fr>), CryptoError> {
    let scalars: Vec<Fr> = (0..messages.len()).map(|_| Fr::rand(rng)).collect();
    let ciphertexts = messages
        .iter()
        .zip(scalars.iter())
        .map(|(message, r)| ElGamal::encrypt(pp, pk, message, r))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((ciphertexts, scalars))
}
