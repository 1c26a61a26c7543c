//! Session registry: creates rooms under fresh codes, tracks which
//! player sits where, and routes actions to room actors.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::time::Duration;

use president_core::{Card, GameConfig, GameError, GameSession, GameStatus, PlayerId};
use president_protocol::RoomCode;

use crate::room::spawn_room;
use crate::{EventSender, RegistryError, RoomHandle, RoomInfo};

/// Tuning knobs for the registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Command channel size for each room actor.
    pub channel_size: usize,
    /// How long a finished room lingers before [`sweep_finished`]
    /// reclaims it.
    ///
    /// [`sweep_finished`]: SessionRegistry::sweep_finished
    pub finished_retention: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            channel_size: 64,
            finished_retention: Duration::from_secs(3600),
        }
    }
}

/// Owns every active room and the player-to-room index.
///
/// This is the entry point for all game actions from higher layers
/// (the connection accept loop, a bot harness). A player can be in at
/// most one room at a time; that invariant lives here, not in rooms.
pub struct SessionRegistry<G: GameSession> {
    config: RegistryConfig,
    /// Active rooms, keyed by their shareable code.
    rooms: HashMap<RoomCode, RoomHandle>,
    /// Maps each player to the room they are currently in.
    player_rooms: HashMap<PlayerId, RoomCode>,
    _game: PhantomData<G>,
}

impl<G: GameSession> SessionRegistry<G> {
    /// Creates an empty registry with default tuning.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        SessionRegistry {
            config,
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
            _game: PhantomData,
        }
    }

    /// Creates a room under a fresh unique code with the creator
    /// seated as host, and returns the code and the host's id.
    ///
    /// `max_players` of `None` takes the variant default.
    pub fn create_game(
        &mut self,
        display_name: impl Into<String>,
        max_players: Option<usize>,
        sender: EventSender,
    ) -> (RoomCode, PlayerId) {
        let code = self.unique_code();
        let config = match max_players {
            Some(max) => GameConfig::president(max),
            None => GameConfig::default(),
        };

        let (handle, host_id) = spawn_room::<G>(
            code.clone(),
            config,
            display_name.into(),
            sender,
            self.config.channel_size,
        );
        self.rooms.insert(code.clone(), handle);
        self.player_rooms.insert(host_id, code.clone());

        tracing::info!(%code, %host_id, "game created");
        (code, host_id)
    }

    /// Adds a player to the room with this code, returning their
    /// freshly assigned id.
    pub async fn join_game(
        &mut self,
        code: &RoomCode,
        display_name: impl Into<String>,
        sender: EventSender,
    ) -> Result<PlayerId, RegistryError> {
        let handle = self
            .rooms
            .get(code)
            .ok_or_else(|| RegistryError::GameNotFound(code.clone()))?;

        let player_id = PlayerId::random();
        handle.join(player_id, display_name.into(), sender).await?;
        self.player_rooms.insert(player_id, code.clone());
        Ok(player_id)
    }

    /// Flips a player's readiness in their current room.
    pub async fn toggle_ready(&self, player_id: PlayerId) -> Result<bool, RegistryError> {
        self.room_of(player_id)?.toggle_ready(player_id).await
    }

    /// Starts the game in the player's room. Rejected unless the
    /// player is the host.
    pub async fn start_game(&self, player_id: PlayerId) -> Result<(), RegistryError> {
        self.room_of(player_id)?.start(player_id).await
    }

    /// Routes a play to the player's room.
    pub async fn play_cards(
        &self,
        player_id: PlayerId,
        cards: Vec<Card>,
    ) -> Result<(), RegistryError> {
        self.room_of(player_id)?.play(player_id, cards).await
    }

    /// Routes a pass to the player's room.
    pub async fn pass_turn(&self, player_id: PlayerId) -> Result<(), RegistryError> {
        self.room_of(player_id)?.pass(player_id).await
    }

    /// Removes a player from whatever room they are in, destroying the
    /// room if it empties. Returns the room code they left, if any.
    ///
    /// This is also the disconnect path, so an already-gone room is
    /// not an error.
    pub async fn leave_game(&mut self, player_id: PlayerId) -> Option<RoomCode> {
        let code = self.player_rooms.remove(&player_id)?;

        let remaining = match self.rooms.get(&code) {
            Some(handle) => handle.leave(player_id).await.ok(),
            None => None,
        };
        tracing::info!(%code, %player_id, "player left game");

        if remaining == Some(0) {
            self.destroy_room(&code).await;
        }
        Some(code)
    }

    /// Shuts down a room and drops every index entry pointing at it.
    pub async fn destroy_room(&mut self, code: &RoomCode) {
        if let Some(handle) = self.rooms.remove(code) {
            let _ = handle.shutdown().await;
            self.player_rooms.retain(|_, c| c != code);
            tracing::info!(%code, "room destroyed");
        }
    }

    /// Reclaims rooms whose game finished longer ago than the
    /// configured retention, plus any abandoned rooms. Returns the
    /// codes that were removed.
    pub async fn sweep_finished(&mut self) -> Vec<RoomCode> {
        let handles: Vec<RoomHandle> = self.rooms.values().cloned().collect();
        let mut expired = Vec::new();
        for handle in handles {
            let Ok(info) = handle.get_info().await else {
                // Dead actor, reclaim the entry.
                expired.push(handle.code().clone());
                continue;
            };
            let done = match info.status {
                GameStatus::Finished => info
                    .finished_for
                    .is_some_and(|age| age >= self.config.finished_retention),
                GameStatus::Abandoned => true,
                _ => false,
            };
            if done {
                expired.push(info.code);
            }
        }

        for code in &expired {
            self.destroy_room(code).await;
        }
        expired
    }

    /// Returns info about the room with this code.
    pub async fn room_info(&self, code: &RoomCode) -> Result<RoomInfo, RegistryError> {
        let handle = self
            .rooms
            .get(code)
            .ok_or_else(|| RegistryError::GameNotFound(code.clone()))?;
        handle.get_info().await
    }

    /// Returns the code of the room a player is currently in, if any.
    pub fn player_room(&self, player_id: PlayerId) -> Option<&RoomCode> {
        self.player_rooms.get(&player_id)
    }

    /// Returns the number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn room_of(&self, player_id: PlayerId) -> Result<&RoomHandle, RegistryError> {
        let code = self
            .player_rooms
            .get(&player_id)
            .ok_or(GameError::InvalidPlayer(player_id))?;
        self.rooms
            .get(code)
            .ok_or_else(|| RegistryError::GameNotFound(code.clone()))
    }

    /// Draws codes until one misses the live-room table. With a 32^6
    /// code space collisions are rare; the loop almost never repeats.
    fn unique_code(&self) -> RoomCode {
        let mut rng = rand::rng();
        loop {
            let code = RoomCode::generate(&mut rng);
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }
}

impl<G: GameSession> Default for SessionRegistry<G> {
    fn default() -> Self {
        Self::new()
    }
}
