//! Error taxonomy for in-room operations.
//!
//! All of these are local and recoverable: a rejected action leaves
//! game state untouched and is reported only to the acting
//! participant. None are fatal to the room or the process.

use crate::game::GameStatus;
use crate::player::PlayerId;

/// Errors raised by game-session operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The roster is at `max_players`.
    #[error("game is full")]
    CapacityExceeded,

    /// The operation is not allowed in the current lifecycle phase,
    /// e.g. joining after start.
    #[error("cannot do that while the game is {0}")]
    WrongPhase(GameStatus),

    /// Start preconditions unmet: too few players, or not all ready.
    #[error("not enough players or not all players are ready")]
    NotReady,

    /// Only the host may start the game.
    #[error("only the host can start the game")]
    NotHost,

    /// The acting participant is not in this game.
    #[error("unknown player {0}")]
    InvalidPlayer(PlayerId),

    #[error("not your turn")]
    NotYourTurn,

    /// The player tried to play cards their hand does not hold.
    #[error("you don't have these cards")]
    CardsNotOwned,

    /// The play fails the rules engine (bad set, too low, or missing
    /// the opening card on the first turn).
    #[error("invalid play")]
    InvalidPlay,

    /// The 3 of clubs holder cannot pass away the forced opening.
    #[error("cannot pass - you must play the 3 of clubs")]
    MustPlayOpeningCard,
}

impl GameError {
    /// Stable machine-readable code for the wire contract.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::CapacityExceeded => "capacity_exceeded",
            GameError::WrongPhase(_) => "wrong_phase",
            GameError::NotReady => "not_ready",
            GameError::NotHost => "not_host",
            GameError::InvalidPlayer(_) => "invalid_player",
            GameError::NotYourTurn => "not_your_turn",
            GameError::CardsNotOwned => "cards_not_owned",
            GameError::InvalidPlay => "invalid_play",
            GameError::MustPlayOpeningCard => "must_play_opening_card",
        }
    }
}
