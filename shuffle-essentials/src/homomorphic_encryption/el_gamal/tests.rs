#[cfg(test)]
mod test {
    use crate::curve::Fr;
    use crate::homomorphic_encryption::el_gamal::{
        encrypt_vector, ElGamal, Parameters, Plaintext,
    };
    use crate::homomorphic_encryption::HomomorphicEncryptionScheme;
    use ark_std::rand::thread_rng;
    use ark_std::UniformRand;

    #[test]
    fn encrypt_decrypt_round_trip() {
        let mut rng = thread_rng();
        let pp = Parameters::new();
        let (pk, sk) = ElGamal::keygen(&pp, &mut rng).unwrap();

        let message = Plaintext::rand(&mut rng);
        let r = Fr::rand(&mut rng);

        let ciphertext = ElGamal::encrypt(&pp, &pk, &message, &r).unwrap();
        let recovered = ElGamal::decrypt(&pp, &sk, &ciphertext).unwrap();

        assert_eq!(message, recovered);
    }

    #[test]
    fn rerandomization_preserves_plaintext() {
        let mut rng = thread_rng();
        let pp = Parameters::new();
        let (pk, sk) = ElGamal::keygen(&pp, &mut rng).unwrap();

        let message = Plaintext::rand(&mut rng);
        let r = Fr::rand(&mut rng);
        let extra = Fr::rand(&mut rng);

        let ciphertext = ElGamal::encrypt(&pp, &pk, &message, &r).unwrap();
        let rerandomized = ElGamal::rerandomize(&pp, &pk, &ciphertext, &extra).unwrap();

        // the ciphertext changed, the plaintext did not
        assert_ne!(ciphertext, rerandomized);
        assert_eq!(
            message,
            ElGamal::decrypt(&pp, &sk, &rerandomized).unwrap()
        );

        // layering r then r' is the same as encrypting with r + r'
        let direct = ElGamal::encrypt(&pp, &pk, &message, &(r + extra)).unwrap();
        assert_eq!(direct, rerandomized);
    }

    #[test]
    fn ciphertexts_add_homomorphically() {
        let mut rng = thread_rng();
        let pp = Parameters::new();
        let (pk, sk) = ElGamal::keygen(&pp, &mut rng).unwrap();

        let m1 = Plaintext::rand(&mut rng);
        let m2 = Plaintext::rand(&mut rng);
        let c1 = ElGamal::encrypt(&pp, &pk, &m1, &Fr::rand(&mut rng)).unwrap();
        let c2 = ElGamal::encrypt(&pp, &pk, &m2, &Fr::rand(&mut rng)).unwrap();

        let combined = ElGamal::decrypt(&pp, &sk, &(c1 + c2)).unwrap();
        assert_eq!(combined, m1 + m2);
    }

    #[test]
    fn vector_encryption_uses_distinct_scalars() {
        let mut rng = thread_rng();
        let pp = Parameters::new();
        let (pk, sk) = ElGamal::keygen(&pp, &mut rng).unwrap();

        let messages: Vec<Plaintext> = (0..8).map(|_| Plaintext::rand(&mut rng)).collect();
        let (ciphertexts, scalars) = encrypt_vector(&pp, &pk, &messages, &mut rng).unwrap();

        assert_eq!(ciphertexts.len(), messages.len());
        assert_eq!(scalars.len(), messages.len());
        for i in 0..scalars.len() {
            for j in i + 1..scalars.len() {
                assert_ne!(scalars[i], scalars[j]);
            }
        }
        for (message, ciphertext) in messages.iter().zip(ciphertexts.iter()) {
            assert_eq!(*message, ElGamal::decrypt(&pp, &sk, ciphertext).unwrap());
        }
    }
}
