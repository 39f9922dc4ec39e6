//! Partial decryption of dealt cards.
//!
//! For a ciphertext `(c0, c1)` encrypted under the aggregate key, each
//! player contributes a reveal token `d = -(sk * c0)` together with a
//! Chaum-Pedersen proof that the same secret links their registered
//! public key and the token. Summing `c1` with every player's token
//! removes the full mask and exposes the card point. The owner's own
//! token enters the sum exactly like the others'.

use ark_std::rand::{CryptoRng, Rng};
use blake2::Blake2b512;
use shuffle_essentials::curve::ProjectivePoint;
use shuffle_essentials::error::CryptoError;
use shuffle_essentials::homomorphic_encryption::el_gamal::Ciphertext;
use shuffle_essentials::utils::rand::FiatShamirRng;
use shuffle_essentials::zkp::proofs::chaum_pedersen_dl_equality::{self, DLEquality};
use shuffle_essentials::zkp::ArgumentOfKnowledge;

use crate::cards::{Card, CardMap};
use crate::error::RevealError;
use crate::keys::KeyPair;

const LOG_TARGET: &str = "zk_card_engine::reveal";

/// Transcript label binding reveal proofs to this protocol step.
const REVEAL_TRANSCRIPT_LABEL: &[u8] = b"reveal_token";

pub type RevealProof = chaum_pedersen_dl_equality::Proof;

/// One player's decryption contribution for one card: `-(sk * c0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealToken(pub ProjectivePoint);

/// Compute this player's reveal token for `c0`, with a proof that it was
/// derived from the same secret as the player's public key. The secret
/// itself never enters the output.
pub fn compute_reveal_token<R: Rng + CryptoRng>(
    rng: &mut R,
    keys: &KeyPair,
    c0: &ProjectivePoint,
) -> Result<(RevealToken, RevealProof), CryptoError> {
    let masked = c0.mul_scalar(keys.secret());

    let crs = chaum_pedersen_dl_equality::Parameters::new(ProjectivePoint::GENERATOR, *c0);
    let statement = chaum_pedersen_dl_equality::Statement::new(keys.pk, masked);
    let mut fs_rng = FiatShamirRng::<Blake2b512>::from_seed(REVEAL_TRANSCRIPT_LABEL);
    let proof = DLEquality::prove(rng, &crs, &statement, keys.secret(), &mut fs_rng)?;

    Ok((RevealToken(masked.neg()), proof))
}

/// Check another player's token against their registered public key
/// before it is allowed into any combination.
pub fn verify_reveal_token(
    token: &RevealToken,
    proof: &RevealProof,
    pk: &ProjectivePoint,
    c0: &ProjectivePoint,
) -> Result<(), CryptoError> {
    let masked = token.0.neg();

    let crs = chaum_pedersen_dl_equality::Parameters::new(ProjectivePoint::GENERATOR, *c0);
    let statement = chaum_pedersen_dl_equality::Statement::new(*pk, masked);
    let mut fs_rng = FiatShamirRng::<Blake2b512>::from_seed(REVEAL_TRANSCRIPT_LABEL);
    DLEquality::verify(&crs, &statement, proof, &mut fs_rng)
}

/// Sum `c1` with every contribution. With tokens from all players the
/// aggregate mask cancels and the plaintext card point remains.
pub fn unmask(ciphertext: &Ciphertext, tokens: &[RevealToken]) -> ProjectivePoint {
    tokens
        .iter()
        .fold(ciphertext.1, |acc, token| acc.add(&token.0))
}

/// Unmask and resolve to a card. Fails with `UnknownCard` when the
/// contributions are inconsistent (wrong player skipped, wrong
/// ciphertext); the caller must abort the disclosure for this card.
pub fn open_card(
    map: &CardMap,
    ciphertext: &Ciphertext,
    tokens: &[RevealToken],
) -> Result<Card, RevealError> {
    let card = map.resolve(&unmask(ciphertext, tokens))?;
    tracing::debug!(target: LOG_TARGET, card = %card, "card opened");
    Ok(card)
}

/// Open a card from `(token, proof, contributor pk)` triples, verifying
/// every proof first.
pub fn open_card_checked(
    map: &CardMap,
    ciphertext: &Ciphertext,
    contributions: &[(RevealToken, RevealProof, ProjectivePoint)],
) -> Result<Card, RevealError> {
    for (token, proof, pk) in contributions {
        verify_reveal_token(token, proof, pk, &ciphertext.0)?;
    }
    let tokens: Vec<RevealToken> = contributions.iter().map(|(token, _, _)| *token).collect();
    open_card(map, ciphertext, &tokens)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cards::{Card, CardMap, Rank, Suit};
    use crate::keys::{aggregate_public_key, KeyManager, DEFAULT_KEY_BITS};
    use ark_std::UniformRand;
    use rand::thread_rng;
    use shuffle_essentials::curve::Fr;
    use shuffle_essentials::homomorphic_encryption::el_gamal::{ElGamal, Parameters, Plaintext};
    use shuffle_essentials::homomorphic_encryption::HomomorphicEncryptionScheme;
    use shuffle_essentials::utils::rand::sample_vector;

    #[test]
    fn joint_decryption_recovers_the_card() {
        let mut rng = thread_rng();
        let players: Vec<KeyManager> = (0..3)
            .map(|_| KeyManager::generate(&mut rng, DEFAULT_KEY_BITS))
            .collect();
        let aggregate =
            aggregate_public_key(&players.iter().map(|p| p.public_key()).collect::<Vec<_>>());

        let card = Card::new(Suit::Diamonds, Rank::Queen);
        let pp = Parameters::new();
        let r = Fr::rand(&mut rng);
        let ciphertext =
            ElGamal::encrypt(&pp, &aggregate, &Plaintext(card.point()), &r).unwrap();

        let map = CardMap::new().unwrap();
        let contributions: Vec<_> = players
            .iter()
            .map(|player| {
                let (token, proof) =
                    compute_reveal_token(&mut rng, player.key_pair(), &ciphertext.0).unwrap();
                (token, proof, player.public_key())
            })
            .collect();

        let opened = open_card_checked(&map, &ciphertext, &contributions).unwrap();
        assert_eq!(opened, card);
    }

    #[test]
    fn missing_contribution_fails_resolution() {
        let mut rng = thread_rng();
        let players: Vec<KeyManager> = (0..3)
            .map(|_| KeyManager::generate(&mut rng, DEFAULT_KEY_BITS))
            .collect();
        let aggregate =
            aggregate_public_key(&players.iter().map(|p| p.public_key()).collect::<Vec<_>>());

        let card = Card::new(Suit::Clubs, Rank::Two);
        let pp = Parameters::new();
        let scalars: Vec<Fr> = sample_vector(&mut rng, 1);
        let ciphertext =
            ElGamal::encrypt(&pp, &aggregate, &Plaintext(card.point()), &scalars[0]).unwrap();

        let map = CardMap::new().unwrap();
        let tokens: Vec<RevealToken> = players[..2]
            .iter()
            .map(|player| {
                compute_reveal_token(&mut rng, player.key_pair(), &ciphertext.0)
                    .unwrap()
                    .0
            })
            .collect();

        assert!(matches!(
            open_card(&map, &ciphertext, &tokens),
            Err(RevealError::UnknownCard)
        ));
    }

    #[test]
    fn token_proved_with_foreign_secret_is_rejected() {
        let mut rng = thread_rng();
        let honest = KeyManager::generate(&mut rng, DEFAULT_KEY_BITS);
        let impostor = KeyManager::generate(&mut rng, DEFAULT_KEY_BITS);

        let c0 = ProjectivePoint::GENERATOR.mul_scalar(&Fr::rand(&mut rng));

        // token and proof computed with the impostor's secret, presented
        // against the honest player's registered key
        let (token, proof) =
            compute_reveal_token(&mut rng, impostor.key_pair(), &c0).unwrap();

        assert!(verify_reveal_token(&token, &proof, &honest.public_key(), &c0).is_err());
    }
}
