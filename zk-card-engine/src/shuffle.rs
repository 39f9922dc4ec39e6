//! The shuffle step: rerandomize every card with a fresh scalar, then
//! apply a uniformly random permutation. Rerandomization alone would leave
//! positions linkable; permutation alone would leave ciphertexts linkable.
//! Together the output deck carries the same multiset of plaintexts,
//! unlinkably reordered, which the shuffle circuit attests to without
//! revealing the permutation.

use ark_std::rand::{CryptoRng, Rng};
use shuffle_essentials::curve::{Fr, ProjectivePoint};
use shuffle_essentials::error::CryptoError;
use shuffle_essentials::homomorphic_encryption::el_gamal::{Ciphertext, ElGamal, Parameters};
use shuffle_essentials::homomorphic_encryption::HomomorphicEncryptionScheme;
use shuffle_essentials::utils::permutation::Permutation;
use shuffle_essentials::utils::rand::sample_vector;

const LOG_TARGET: &str = "zk_card_engine::shuffle";

/// Private witness of one shuffle. `scalars[i]` is the rerandomization
/// scalar of the card that landed in output slot `i`, the order the
/// shuffle circuit expects. Used once for proof construction, then
/// discarded; a witness whose proof failed must never be reused.
pub struct ShuffleWitness {
    pub permutation: Permutation,
    pub scalars: Vec<Fr>,
}

pub struct ShuffleOutput {
    pub deck: Vec<Ciphertext>,
    pub witness: ShuffleWitness,
}

/// Rerandomize and permute an encrypted deck under the aggregate key.
pub fn shuffle_and_rerandomize<R: Rng + CryptoRng>(
    rng: &mut R,
    input: &[Ciphertext],
    aggregate_key: &ProjectivePoint,
) -> Result<ShuffleOutput, CryptoError> {
    let pp = Parameters::new();

    let scalars: Vec<Fr> = sample_vector(rng, input.len());
    let rerandomized = input
        .iter()
        .zip(scalars.iter())
        .map(|(ciphertext, r)| ElGamal::rerandomize(&pp, aggregate_key, ciphertext, r))
        .collect::<Result<Vec<_>, _>>()?;

    let permutation = Permutation::new(rng, input.len());
    let deck = permutation.permute_array(&rerandomized);
    let scalars = permutation.permute_array(&scalars);

    tracing::debug!(target: LOG_TARGET, cards = deck.len(), "deck shuffled");

    Ok(ShuffleOutput {
        deck,
        witness: ShuffleWitness {
            permutation,
            scalars,
        },
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cards::{initial_deck, CardMap, DECK_SIZE};
    use crate::keys::{KeyManager, DEFAULT_KEY_BITS};
    use rand::thread_rng;
    use shuffle_essentials::homomorphic_encryption::el_gamal::Plaintext;

    #[test]
    fn shuffle_preserves_the_card_multiset() {
        let mut rng = thread_rng();
        let manager = KeyManager::generate(&mut rng, DEFAULT_KEY_BITS);
        let pp = Parameters::new();
        let pk = manager.public_key();
        let sk = *manager.key_pair().secret();
        let map = CardMap::new().unwrap();

        let deck = initial_deck();
        let shuffled = shuffle_and_rerandomize(&mut rng, &deck, &pk).unwrap();

        let mut seen = vec![false; DECK_SIZE];
        for ciphertext in &shuffled.deck {
            let Plaintext(point) = ElGamal::decrypt(&pp, &sk, ciphertext).unwrap();
            let card = map.resolve(&point).unwrap();
            assert!(!seen[card.index()], "card appeared twice after shuffle");
            seen[card.index()] = true;
        }
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn witness_scalars_align_with_output_slots() {
        let mut rng = thread_rng();
        let manager = KeyManager::generate(&mut rng, DEFAULT_KEY_BITS);
        let pp = Parameters::new();
        let pk = manager.public_key();

        let deck = initial_deck();
        let shuffled = shuffle_and_rerandomize(&mut rng, &deck, &pk).unwrap();
        let witness = &shuffled.witness;

        for (slot, output) in shuffled.deck.iter().enumerate() {
            let source = &deck[witness.permutation.mapping[slot]];
            let expected =
                ElGamal::rerandomize(&pp, &pk, source, &witness.scalars[slot]).unwrap();
            assert_eq!(*output, expected);
        }
    }
}
