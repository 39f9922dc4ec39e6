use super::super::Ciphertext;
use crate::curve::{Fr, ProjectivePoint};
use ark_std::rand::Rng;
use ark_std::UniformRand;

impl std::ops::Add<Ciphertext> for Ciphertext {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.add(&rhs.0), self.1.add(&rhs.1))
    }
}

impl std::ops::Mul<Fr> for Ciphertext {
    type Output = Self;

    fn mul(self, x: Fr) -> Self::Output {
        Self(self.0.mul_scalar(&x), self.1.mul_scalar(&x))
    }
}

impl std::iter::Sum for Ciphertext {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::neutral(), |a, b| a + b)
    }
}

impl Ciphertext {
    /// The additive identity: both components the neutral point.
    pub fn neutral() -> Self {
        Self(ProjectivePoint::IDENTITY, ProjectivePoint::IDENTITY)
    }
}

impl UniformRand for Ciphertext {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let c0 = ProjectivePoint::rand(rng);
        let c1 = ProjectivePoint::rand(rng);

        Self(c0, c1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress};
    use ark_std::rand::thread_rng;

    #[test]
    fn serialize_unserialize_test() {
        let mut rng = thread_rng();
        let cipher = Ciphertext::rand(&mut rng);

        let mut serialized = vec![0; cipher.serialized_size(Compress::Yes)];
        cipher
            .serialize_with_mode(&mut serialized[..], Compress::Yes)
            .unwrap();

        let deserialized = Ciphertext::deserialize_compressed(&serialized[..]).unwrap();
        assert_eq!(cipher, deserialized);
    }
}
