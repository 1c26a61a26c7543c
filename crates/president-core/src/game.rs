//! The session state machine: one game room's roster, turn pointer,
//! played pile, pass tracking, and lifecycle.
//!
//! Every operation validates fully before mutating, so a rejected
//! action leaves the session byte-for-byte unchanged.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::Card;
use crate::deck::Deck;
use crate::error::GameError;
use crate::player::{Player, PlayerId};
use crate::rules;
use crate::view::{GameSnapshot, PlayerView, Ranking};

/// Opaque unique id for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn random() -> GameId {
        GameId(Uuid::new_v4())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session lifecycle. Transitions are forward-only:
///
/// ```text
/// Lobby → InProgress → Finished
/// ```
///
/// `Abandoned` is reached from any state when the roster empties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Lobby,
    InProgress,
    Finished,
    Abandoned,
}

impl GameStatus {
    /// Returns `true` if the session is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, GameStatus::Lobby)
    }

    /// Returns `true` if a hand is actively being played.
    pub fn is_active(&self) -> bool {
        matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Lobby => "lobby",
            GameStatus::InProgress => "in_progress",
            GameStatus::Finished => "finished",
            GameStatus::Abandoned => "abandoned",
        };
        write!(f, "{label}")
    }
}

/// Which game variant a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    President,
}

/// Per-session settings fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub game_type: GameType,
    pub min_players: usize,
    pub max_players: usize,
}

impl GameConfig {
    /// President config with the given table size (clamped to the
    /// 3..=10 the variant supports).
    pub fn president(max_players: usize) -> GameConfig {
        GameConfig {
            game_type: GameType::President,
            min_players: 3,
            max_players: max_players.clamp(3, 10),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::president(6)
    }
}

/// Result of a successful play, for the broadcast layer.
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    /// The cards that hit the table.
    pub cards: Vec<Card>,
    /// The acting player emptied their hand on this play.
    pub player_finished: bool,
    /// `Some` when this play ended the game; rankings in finish order.
    pub rankings: Option<Vec<Ranking>>,
    /// Whose turn it is now; `None` when the game just ended.
    pub next_player: Option<PlayerId>,
}

/// Result of a successful pass.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    /// Everyone but the last actor passed, so the table cleared.
    pub trick_cleared: bool,
    pub next_player: PlayerId,
}

/// The capability set a game variant exposes to the registry and room
/// actor. The registry holds sessions through this trait, never a
/// concrete type.
pub trait GameSession: Send + 'static {
    /// Creates a session in the lobby phase.
    fn create(code: String, config: GameConfig) -> Self;

    fn add_player(&mut self, player: Player) -> Result<(), GameError>;
    fn remove_player(&mut self, player_id: PlayerId) -> Result<Player, GameError>;

    /// Flips a player's readiness, returning the new value.
    fn toggle_ready(&mut self, player_id: PlayerId) -> Result<bool, GameError>;

    fn start(&mut self) -> Result<(), GameError>;
    fn play_cards(&mut self, player_id: PlayerId, cards: Vec<Card>)
    -> Result<PlayOutcome, GameError>;
    fn pass_turn(&mut self, player_id: PlayerId) -> Result<PassOutcome, GameError>;

    /// Pure legality check; enforcement happens inside `play_cards`.
    fn is_valid_play(&self, player_id: PlayerId, cards: &[Card]) -> bool;

    fn status(&self) -> GameStatus;
    fn config(&self) -> &GameConfig;
    fn player(&self, player_id: PlayerId) -> Option<&Player>;
    fn player_count(&self) -> usize;
    fn current_player_id(&self) -> Option<PlayerId>;

    fn snapshot(&self) -> GameSnapshot;
    fn player_view(&self, player_id: PlayerId) -> Option<PlayerView>;
}

/// One President session.
#[derive(Debug)]
pub struct PresidentGame {
    id: GameId,
    code: String,
    status: GameStatus,
    config: GameConfig,
    /// Insertion order is seat order.
    players: Vec<Player>,
    current_player_index: usize,
    played_cards: Vec<Card>,
    passed_players: HashSet<PlayerId>,
    finish_order: Vec<PlayerId>,
    is_first_turn: bool,
}

impl PresidentGame {
    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn played_cards(&self) -> &[Card] {
        &self.played_cards
    }

    pub fn finish_order(&self) -> &[PlayerId] {
        &self.finish_order
    }

    pub fn is_first_turn(&self) -> bool {
        self.is_first_turn
    }

    fn seat_of(&self, player_id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    fn require_turn(&self, player_id: PlayerId) -> Result<usize, GameError> {
        if !self.status.is_active() {
            return Err(GameError::WrongPhase(self.status));
        }
        let seat = self
            .seat_of(player_id)
            .ok_or(GameError::InvalidPlayer(player_id))?;
        if seat != self.current_player_index {
            return Err(GameError::NotYourTurn);
        }
        Ok(seat)
    }

    /// Advances to the next seat with cards left, wrapping around.
    /// Never stalls: end-of-game is detected before this runs while
    /// only one unfinished player remains.
    fn advance_turn(&mut self) {
        let n = self.players.len();
        let mut next = (self.current_player_index + 1) % n;
        while self.players[next].has_empty_hand() {
            next = (next + 1) % n;
        }
        self.current_player_index = next;
    }

    /// Appends the one remaining player to the finish order, assigns
    /// ranks, and moves to `Finished`. Returns rankings in finish
    /// order.
    fn end_game(&mut self) -> Vec<Ranking> {
        if let Some(last) = self
            .players
            .iter()
            .find(|p| !self.finish_order.contains(&p.id))
        {
            self.finish_order.push(last.id);
        }

        let ranks = rules::determine_finish_ranks(&self.finish_order, self.players.len());
        for player in &mut self.players {
            if let Some(rank) = ranks.get(&player.id) {
                player.set_rank(*rank);
            }
        }

        self.status = GameStatus::Finished;
        self.finish_order
            .iter()
            .map(|id| Ranking {
                player_id: *id,
                rank: ranks[id],
            })
            .collect()
    }
}

impl GameSession for PresidentGame {
    fn create(code: String, config: GameConfig) -> Self {
        PresidentGame {
            id: GameId::random(),
            code,
            status: GameStatus::Lobby,
            config,
            players: Vec::new(),
            current_player_index: 0,
            played_cards: Vec::new(),
            passed_players: HashSet::new(),
            finish_order: Vec::new(),
            is_first_turn: true,
        }
    }

    fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        if !self.status.is_joinable() {
            return Err(GameError::WrongPhase(self.status));
        }
        if self.players.len() >= self.config.max_players {
            return Err(GameError::CapacityExceeded);
        }
        self.players.push(player);
        Ok(())
    }

    fn remove_player(&mut self, player_id: PlayerId) -> Result<Player, GameError> {
        let seat = self
            .seat_of(player_id)
            .ok_or(GameError::InvalidPlayer(player_id))?;
        let player = self.players.remove(seat);
        self.passed_players.remove(&player_id);
        // The finish order only ever names seated players.
        self.finish_order.retain(|id| *id != player_id);

        if self.players.is_empty() {
            // Full evacuation: abandoned from any state.
            self.status = GameStatus::Abandoned;
            self.current_player_index = 0;
            return Ok(player);
        }

        // Re-anchor the turn pointer so it never dangles.
        if seat < self.current_player_index {
            self.current_player_index -= 1;
        } else if seat == self.current_player_index {
            self.current_player_index %= self.players.len();
            if self.status.is_active()
                && self.players.iter().any(|p| !p.has_empty_hand())
            {
                while self.players[self.current_player_index].has_empty_hand() {
                    self.current_player_index =
                        (self.current_player_index + 1) % self.players.len();
                }
            }
        }

        // A departure can leave a single unfinished player behind; the
        // game ends exactly as if the last play had just landed.
        if self.status.is_active()
            && self.finish_order.len() >= self.players.len().saturating_sub(1)
        {
            self.end_game();
        }

        Ok(player)
    }

    fn toggle_ready(&mut self, player_id: PlayerId) -> Result<bool, GameError> {
        let seat = self
            .seat_of(player_id)
            .ok_or(GameError::InvalidPlayer(player_id))?;
        Ok(self.players[seat].toggle_ready())
    }

    fn start(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::Lobby {
            return Err(GameError::WrongPhase(self.status));
        }
        if self.players.len() < self.config.min_players
            || !self.players.iter().all(|p| p.is_ready)
        {
            return Err(GameError::NotReady);
        }

        let mut deck = Deck::new();
        deck.shuffle(&mut rand::rng());
        let per_player = Deck::SIZE / self.players.len();
        for player in &mut self.players {
            player.add_cards(deck.deal(per_player));
        }

        // With a full freshly dealt deck somebody always holds 3♣;
        // fall back to seat 0 if not.
        self.current_player_index = rules::find_starting_player(&self.players).unwrap_or(0);
        self.status = GameStatus::InProgress;
        self.is_first_turn = true;
        Ok(())
    }

    fn play_cards(
        &mut self,
        player_id: PlayerId,
        cards: Vec<Card>,
    ) -> Result<PlayOutcome, GameError> {
        let seat = self.require_turn(player_id)?;

        if !self.players[seat].has_cards(&cards) {
            return Err(GameError::CardsNotOwned);
        }
        if !self.is_valid_play(player_id, &cards) {
            return Err(GameError::InvalidPlay);
        }

        let player = &mut self.players[seat];
        player.remove_cards(&cards);
        self.played_cards = cards.clone();
        self.passed_players.clear();

        let player_finished = player.has_empty_hand();
        if player_finished {
            self.finish_order.push(player_id);
            if self.finish_order.len() >= self.players.len() - 1 {
                let rankings = self.end_game();
                return Ok(PlayOutcome {
                    cards,
                    player_finished: true,
                    rankings: Some(rankings),
                    next_player: None,
                });
            }
        }

        self.advance_turn();
        self.is_first_turn = false;
        Ok(PlayOutcome {
            cards,
            player_finished,
            rankings: None,
            next_player: self.current_player_id(),
        })
    }

    fn pass_turn(&mut self, player_id: PlayerId) -> Result<PassOutcome, GameError> {
        let seat = self.require_turn(player_id)?;

        if self.is_first_turn && self.players[seat].hand.contains(&Card::OPENING) {
            return Err(GameError::MustPlayOpeningCard);
        }

        self.passed_players.insert(player_id);

        // Observed original behavior: compare against active players
        // minus one, where "active" means a non-empty hand. Kept
        // as-is, including its behavior with mid-round finishers.
        let active = self.players.iter().filter(|p| !p.has_empty_hand()).count();
        let trick_cleared = self.passed_players.len() >= active.saturating_sub(1);
        if trick_cleared {
            self.played_cards.clear();
            self.passed_players.clear();
        }

        self.advance_turn();
        let next_player = self.players[self.current_player_index].id;
        Ok(PassOutcome {
            trick_cleared,
            next_player,
        })
    }

    fn is_valid_play(&self, _player_id: PlayerId, cards: &[Card]) -> bool {
        rules::is_valid_card_set(cards)
            && rules::must_include_opening_card(cards, self.is_first_turn)
            && rules::beats_last_play(cards, &self.played_cards)
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    fn player_count(&self) -> usize {
        self.players.len()
    }

    fn current_player_id(&self) -> Option<PlayerId> {
        self.players.get(self.current_player_index).map(|p| p.id)
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            code: self.code.clone(),
            status: self.status,
            config: self.config.clone(),
            players: self.players.iter().map(Player::public).collect(),
            current_player: self.current_player_id(),
            played_cards: self.played_cards.clone(),
            finish_order: self.finish_order.clone(),
            is_first_turn: self.is_first_turn,
        }
    }

    fn player_view(&self, player_id: PlayerId) -> Option<PlayerView> {
        let player = self.player(player_id)?;
        Some(PlayerView {
            snapshot: self.snapshot(),
            hand: player.hand.clone(),
        })
    }
}
