//! Per-recipient snapshots of session state.
//!
//! The broadcast layer never sends another participant's hand. The
//! public [`GameSnapshot`] carries card counts only; [`PlayerView`]
//! adds exactly one hand — the recipient's own.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::game::{GameConfig, GameStatus};
use crate::player::{FinishRank, PlayerId, PublicPlayer};

/// Public state of one session, safe to broadcast to the whole room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub code: String,
    pub status: GameStatus,
    pub config: GameConfig,
    /// Roster in seat order.
    pub players: Vec<PublicPlayer>,
    pub current_player: Option<PlayerId>,
    /// The most recent legal play; empty after a trick reset.
    pub played_cards: Vec<Card>,
    pub finish_order: Vec<PlayerId>,
    pub is_first_turn: bool,
}

/// One participant's view: the public snapshot plus their own hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    #[serde(flatten)]
    pub snapshot: GameSnapshot,
    pub hand: Vec<Card>,
}

/// A finish-order entry in the end-of-game rankings broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub player_id: PlayerId,
    pub rank: FinishRank,
}
