//! Card identity and rank ordering.
//!
//! President is a climbing game: only the rank matters for strength.
//! Ranks are ordered `3 < 4 < ... < K < A < 2`, with 2 the highest
//! card in the deck. Suits identify cards but never break ties.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four French suits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits, in deck-construction order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        };
        write!(f, "{symbol}")
    }
}

/// A card rank in climbing order.
///
/// The discriminants encode strength directly: `Three` is 0 and `Two`
/// is 12, so the derived `Ord` compares ranks the way the game does.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Rank {
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
}

impl Rank {
    /// All ranks, weakest to strongest.
    pub const ALL: [Rank; 13] = [
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
        Rank::Two,
    ];

    /// Numeric strength: position in the climbing order (0..=12).
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
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
            Rank::Two => "2",
        };
        write!(f, "{label}")
    }
}

/// A single playing card. Immutable value type; identity is the
/// (suit, rank) pair, unique within one deck.
///
/// `rank` comes first so the derived `Ord` sorts by strength, with suit
/// only as a deterministic tiebreaker for hand display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// The 3 of clubs: its holder opens the game and must include it
    /// in their first play.
    pub const OPENING: Card = Card {
        rank: Rank::Three,
        suit: Suit::Clubs,
    };

    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Returns `true` if this card outranks `other`.
    pub fn beats(self, other: Card) -> bool {
        self.rank.value() > other.rank.value()
    }

    pub fn same_rank(self, other: Card) -> bool {
        self.rank == other.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_values_follow_climbing_order() {
        assert_eq!(Rank::Three.value(), 0);
        assert_eq!(Rank::Four.value(), 1);
        assert_eq!(Rank::Ace.value(), 11);
        assert_eq!(Rank::Two.value(), 12);
        for pair in Rank::ALL.windows(2) {
            assert!(pair[0].value() < pair[1].value());
        }
    }

    #[test]
    fn test_two_beats_ace() {
        let two = Card::new(Rank::Two, Suit::Hearts);
        let ace = Card::new(Rank::Ace, Suit::Spades);
        assert!(two.beats(ace));
        assert!(!ace.beats(two));
    }

    #[test]
    fn test_suit_never_affects_strength() {
        let a = Card::new(Rank::Seven, Suit::Hearts);
        let b = Card::new(Rank::Seven, Suit::Spades);
        assert!(!a.beats(b));
        assert!(!b.beats(a));
        assert!(a.same_rank(b));
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::OPENING.to_string(), "3♣");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10♥");
    }

    #[test]
    fn test_card_serializes_with_short_rank_labels() {
        let json = serde_json::to_value(Card::new(Rank::Queen, Suit::Diamonds)).unwrap();
        assert_eq!(json["rank"], "Q");
        assert_eq!(json["suit"], "diamonds");

        let json = serde_json::to_value(Card::new(Rank::Ten, Suit::Clubs)).unwrap();
        assert_eq!(json["rank"], "10");
    }

    #[test]
    fn test_card_round_trip() {
        let card = Card::new(Rank::Two, Suit::Spades);
        let bytes = serde_json::to_vec(&card).unwrap();
        let decoded: Card = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(card, decoded);
    }
}
