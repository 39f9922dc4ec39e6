//! The 52-card deck and its fixed embedding into the curve.
//!
//! Card `i` in the canonical order maps to the point `(i+1)*G`. The
//! mapping is a compile-time bijection: the enumeration order below is
//! load-bearing and must never change, or previously dealt hands become
//! unresolvable.

use serde::{Deserialize, Serialize};
use shuffle_essentials::curve::{AffinePoint, Fr, ProjectivePoint};
use shuffle_essentials::error::CryptoError;
use shuffle_essentials::homomorphic_encryption::el_gamal::Ciphertext;
use std::fmt;

use crate::error::RevealError;

pub const DECK_SIZE: usize = 52;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    fn index(&self) -> usize {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Canonical position in the deck ordering.
    pub fn index(&self) -> usize {
        self.suit.index() * Rank::ALL.len() + self.rank.index()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= DECK_SIZE {
            return None;
        }
        let suit = Suit::ALL[index / Rank::ALL.len()];
        let rank = Rank::ALL[index % Rank::ALL.len()];
        Some(Self { suit, rank })
    }

    /// The card's fixed plaintext point, `(index + 1) * G`.
    pub fn point(&self) -> ProjectivePoint {
        let scalar = Fr::from((self.index() + 1) as u64);
        ProjectivePoint::GENERATOR.mul_scalar(&scalar)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self.rank {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        let suit = match self.suit {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        };
        write!(f, "{} of {}", rank, suit)
    }
}

/// All 52 cards in canonical order.
pub fn all_cards() -> impl Iterator<Item = Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank)))
}

/// The unshuffled baseline deck prior to any masking: slot `i` holds
/// `(neutral, (i+1)*G)`.
pub fn initial_deck() -> Vec<Ciphertext> {
    all_cards()
        .map(|card| Ciphertext(ProjectivePoint::IDENTITY, card.point()))
        .collect()
}

/// Reverse lookup table from card points back to cards, compared in
/// affine coordinates so that every projective representative of a card
/// point resolves identically.
pub struct CardMap {
    entries: Vec<(AffinePoint, Card)>,
}

impl CardMap {
    pub fn new() -> Result<Self, CryptoError> {
        let entries = all_cards()
            .map(|card| Ok((card.point().to_affine()?, card)))
            .collect::<Result<Vec<_>, CryptoError>>()?;
        Ok(Self { entries })
    }

    /// Resolve a decrypted point to its card. A miss means the
    /// contributions were inconsistent and the caller must abort the
    /// disclosure, not guess.
    pub fn resolve(&self, point: &ProjectivePoint) -> Result<Card, RevealError> {
        let target = point.to_affine()?;
        self.entries
            .iter()
            .find(|(affine, _)| *affine == target)
            .map(|(_, card)| *card)
            .ok_or(RevealError::UnknownCard)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fifty_two_distinct_indices() {
        let indices: Vec<usize> = all_cards().map(|c| c.index()).collect();
        assert_eq!(indices.len(), DECK_SIZE);
        for (expected, &index) in indices.iter().enumerate() {
            assert_eq!(expected, index);
        }
    }

    #[test]
    fn index_round_trips() {
        for card in all_cards() {
            assert_eq!(Card::from_index(card.index()), Some(card));
        }
        assert_eq!(Card::from_index(DECK_SIZE), None);
    }

    #[test]
    fn every_card_resolves_to_itself() {
        let map = CardMap::new().unwrap();
        for card in all_cards() {
            assert_eq!(map.resolve(&card.point()).unwrap(), card);
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let map = CardMap::new().unwrap();
        let ace = Card::new(Suit::Spades, Rank::Ace);
        let first = map.resolve(&ace.point()).unwrap();
        let second = map.resolve(&ace.point()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, ace);
    }

    #[test]
    fn unrelated_point_is_unknown() {
        let map = CardMap::new().unwrap();
        let off_deck = ProjectivePoint::GENERATOR.mul_scalar(&Fr::from(53u64));
        assert!(matches!(
            map.resolve(&off_deck),
            Err(RevealError::UnknownCard)
        ));
    }

    #[test]
    fn baseline_deck_is_unmasked() {
        let deck = initial_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        for (i, ciphertext) in deck.iter().enumerate() {
            assert_eq!(ciphertext.0, ProjectivePoint::IDENTITY);
            assert_eq!(
                ciphertext.1,
                Card::from_index(i).unwrap().point()
            );
        }
    }
}
