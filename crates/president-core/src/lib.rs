//! Core engine for the President climbing card game.
//!
//! Everything here is synchronous and deterministic given a seeded
//! shuffle: cards and deck, per-player state, the pure rules engine,
//! and the session state machine. Concurrency and broadcasting live a
//! layer up, in `president-registry`.
//!
//! # Key types
//!
//! - [`Card`], [`Deck`] — card identity and dealing
//! - [`Player`], [`PublicPlayer`] — participant state and its
//!   hand-redacted projection
//! - [`rules`] — pure legality and ranking functions
//! - [`GameSession`] — the capability trait a game variant implements
//! - [`PresidentGame`] — the one concrete variant
//! - [`GameError`] — the recoverable error taxonomy

mod card;
mod deck;
mod error;
mod game;
mod player;
pub mod rules;
mod view;

pub use card::{Card, Rank, Suit};
pub use deck::Deck;
pub use error::GameError;
pub use game::{
    GameConfig, GameId, GameSession, GameStatus, GameType, PassOutcome, PlayOutcome,
    PresidentGame,
};
pub use player::{FinishRank, Player, PlayerId, PublicPlayer};
pub use view::{GameSnapshot, PlayerView, Ranking};
