//! Per-participant state: hand, readiness, host flag, finish rank.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::Card;

/// Opaque, globally unique player identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn random() -> PlayerId {
        PlayerId(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Finish-rank label assigned when the game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishRank {
    #[default]
    None,
    President,
    VicePresident,
    Neutral,
    ViceAsshole,
    Asshole,
}

/// A participant in one game. Owned by that game for its lifetime;
/// the hand is mutated only through deal and play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub is_ready: bool,
    pub is_host: bool,
    pub rank: FinishRank,
    /// Seat index assigned at join time, stable thereafter.
    pub position: usize,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, position: usize, is_host: bool) -> Player {
        Player {
            id,
            name: name.into(),
            hand: Vec::new(),
            is_ready: false,
            is_host,
            rank: FinishRank::None,
            position,
        }
    }

    /// Adds cards to the hand and keeps it sorted by strength.
    pub fn add_cards(&mut self, cards: Vec<Card>) {
        self.hand.extend(cards);
        self.hand.sort();
    }

    /// Removes the given cards (by identity) from the hand.
    ///
    /// Cards not present are ignored; callers validate ownership with
    /// [`has_cards`](Self::has_cards) first.
    pub fn remove_cards(&mut self, cards: &[Card]) {
        for card in cards {
            if let Some(i) = self.hand.iter().position(|c| c == card) {
                self.hand.remove(i);
            }
        }
    }

    /// Returns `true` if every listed card is in the hand.
    pub fn has_cards(&self, cards: &[Card]) -> bool {
        cards.iter().all(|card| self.hand.contains(card))
    }

    pub fn card_count(&self) -> usize {
        self.hand.len()
    }

    pub fn has_empty_hand(&self) -> bool {
        self.hand.is_empty()
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.is_ready = ready;
    }

    /// Flips readiness and returns the new value.
    pub fn toggle_ready(&mut self) -> bool {
        self.is_ready = !self.is_ready;
        self.is_ready
    }

    pub fn set_rank(&mut self, rank: FinishRank) {
        self.rank = rank;
    }

    /// Projection safe to show other participants: card count instead
    /// of hand contents.
    pub fn public(&self) -> PublicPlayer {
        PublicPlayer {
            id: self.id,
            name: self.name.clone(),
            is_ready: self.is_ready,
            is_host: self.is_host,
            rank: self.rank,
            position: self.position,
            card_count: self.hand.len(),
        }
    }
}

/// What other players in the room see of a participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicPlayer {
    pub id: PlayerId,
    pub name: String,
    pub is_ready: bool,
    pub is_host: bool,
    pub rank: FinishRank,
    pub position: usize,
    pub card_count: usize,
}
