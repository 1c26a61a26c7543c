//! Deck construction, shuffle, and deal.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, Rank, Suit};

/// A standard 52-card deck.
///
/// Freshly constructed it holds every (suit, rank) combination exactly
/// once. `deal` removes cards, so dealt cards are always disjoint from
/// what remains.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Cards in a fresh deck.
    pub const SIZE: usize = 52;

    pub fn new() -> Deck {
        let mut cards = Vec::with_capacity(Self::SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Permutes the deck in place (Fisher-Yates via `SliceRandom`).
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the top `count` cards, or everything left
    /// if fewer remain.
    pub fn deal(&mut self, count: usize) -> Vec<Card> {
        let n = count.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
