use crate::error::CryptoError;
use ark_std::rand::Rng;

pub mod el_gamal;

/// Trait defining the operations of a rerandomizable homomorphic
/// encryption scheme over the protocol curve.
pub trait HomomorphicEncryptionScheme {
    type Parameters;
    type PublicKey;
    type SecretKey;
    type Randomness;
    type Plaintext;
    type Ciphertext;

    fn keygen<R: Rng>(
        pp: &Self::Parameters,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey), CryptoError>;

    fn encrypt(
        pp: &Self::Parameters,
        pk: &Self::PublicKey,
        message: &Self::Plaintext,
        r: &Self::Randomness,
    ) -> Result<Self::Ciphertext, CryptoError>;

    /// Layer fresh randomness onto an existing ciphertext without touching
    /// the plaintext.
    fn rerandomize(
        pp: &Self::Parameters,
        pk: &Self::PublicKey,
        ciphertext: &Self::Ciphertext,
        r: &Self::Randomness,
    ) -> Result<Self::Ciphertext, CryptoError>;

    fn decrypt(
        pp: &Self::Parameters,
        sk: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::Plaintext, CryptoError>;
}
