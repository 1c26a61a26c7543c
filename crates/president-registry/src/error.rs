//! Error types for the registry layer.

use president_core::GameError;
use president_protocol::RoomCode;

/// Errors that can occur while routing actions to rooms.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No room exists under this code.
    #[error("no game with code {0}")]
    GameNotFound(RoomCode),

    /// The room's command channel is closed or its actor is gone.
    #[error("room {0} is unavailable")]
    RoomUnavailable(RoomCode),

    /// The room rejected the action.
    #[error(transparent)]
    Game(#[from] GameError),
}

impl RegistryError {
    /// Stable machine-readable code for the wire `error` event.
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::GameNotFound(_) => "game_not_found",
            RegistryError::RoomUnavailable(_) => "room_unavailable",
            RegistryError::Game(err) => err.code(),
        }
    }
}
