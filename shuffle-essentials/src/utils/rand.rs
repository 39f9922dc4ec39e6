use ark_serialize::CanonicalSerialize;
use ark_std::marker::PhantomData;
use ark_std::rand::{Rng, RngCore, SeedableRng};
use ark_std::UniformRand;
use digest::{Digest, Output};
use rand_chacha::ChaChaRng;

/// Sample a vector of random elements of type T
pub fn sample_vector<T: UniformRand, R: Rng>(seed: &mut R, length: usize) -> Vec<T> {
    (0..length).map(|_| T::rand(seed)).collect::<Vec<_>>()
}

/// Hash-chained RNG used to derive Fiat-Shamir challenges. Absorbing new
/// material reseeds the stream with `H(bytes || seed)`, so prover and
/// verifier that absorb the same transcript draw the same challenges.
/// The digest must produce at least 32 bytes of output.
pub struct FiatShamirRng<D: Digest> {
    r: ChaChaRng,
    seed: Output<D>,
    #[doc(hidden)]
    digest: PhantomData<D>,
}

impl<D: Digest> RngCore for FiatShamirRng<D> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.r.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.r.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.r.fill_bytes(dest);
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), ark_std::rand::Error> {
        self.r.try_fill_bytes(dest)
    }
}

impl<D: Digest> FiatShamirRng<D> {
    /// Create a new `Self` seeded with `H(label)`.
    pub fn from_seed(label: &[u8]) -> Self {
        let seed = D::digest(label);
        let r = ChaChaRng::from_seed(chacha_seed(&seed));
        Self {
            r,
            seed,
            digest: PhantomData,
        }
    }

    /// Refresh the seed with new material: `self.seed = H(bytes || self.seed)`.
    #[inline]
    pub fn absorb<T: CanonicalSerialize>(&mut self, item: &T) {
        let mut bytes = Vec::new();
        item.serialize_uncompressed(&mut bytes)
            .expect("failed to convert to bytes");
        self.absorb_bytes(&bytes);
    }

    #[inline]
    pub fn absorb_bytes(&mut self, material: &[u8]) {
        let mut bytes = material.to_vec();
        bytes.extend_from_slice(&self.seed);
        self.seed = D::digest(&bytes);
        self.r = ChaChaRng::from_seed(chacha_seed(&self.seed));
    }
}

fn chacha_seed(digest_output: &[u8]) -> [u8; 32] {
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest_output[..32]);
    seed
}

#[cfg(test)]
mod test {
    use super::FiatShamirRng;
    use crate::curve::Fr;
    use ark_std::UniformRand;
    use blake2::Blake2b512;

    type FS = FiatShamirRng<Blake2b512>;

    #[test]
    fn same_transcript_same_challenge() {
        let mut a = FS::from_seed(b"transcript");
        let mut b = FS::from_seed(b"transcript");
        a.absorb(&Fr::from(42u64));
        b.absorb(&Fr::from(42u64));

        assert_eq!(Fr::rand(&mut a), Fr::rand(&mut b));
    }

    #[test]
    fn diverging_transcripts_diverge() {
        let mut a = FS::from_seed(b"transcript");
        let mut b = FS::from_seed(b"transcript");
        a.absorb(&Fr::from(1u64));
        b.absorb(&Fr::from(2u64));

        assert_ne!(Fr::rand(&mut a), Fr::rand(&mut b));
    }
}
