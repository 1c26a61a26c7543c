//! Room actor: an isolated Tokio task that owns one game session.
//!
//! Each room runs in its own task and is the only code that touches
//! its session, so per-room mutual exclusion falls out of the channel:
//! commands are applied one at a time, in arrival order, with no lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, oneshot};

use president_core::{
    Card, GameConfig, GameError, GameSession, GameStatus, Player, PlayerId, Ranking,
};
use president_protocol::{Recipient, RoomCode, ServerEvent};

use crate::RegistryError;

/// Channel for delivering server events to one participant's
/// connection handler.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to a room actor through its channel.
///
/// The `oneshot::Sender` carries the direct reply; everything the rest
/// of the table needs to hear goes out as [`ServerEvent`]s before the
/// reply is sent.
pub(crate) enum RoomCommand {
    Join {
        player_id: PlayerId,
        display_name: String,
        sender: EventSender,
        reply: oneshot::Sender<Result<(), GameError>>,
    },
    ToggleReady {
        player_id: PlayerId,
        reply: oneshot::Sender<Result<bool, GameError>>,
    },
    Start {
        player_id: PlayerId,
        reply: oneshot::Sender<Result<(), GameError>>,
    },
    Play {
        player_id: PlayerId,
        cards: Vec<Card>,
        reply: oneshot::Sender<Result<(), GameError>>,
    },
    Pass {
        player_id: PlayerId,
        reply: oneshot::Sender<Result<(), GameError>>,
    },
    /// Remove a player; replies with the remaining roster size.
    Leave {
        player_id: PlayerId,
        reply: oneshot::Sender<Result<usize, GameError>>,
    },
    GetInfo {
        reply: oneshot::Sender<RoomInfo>,
    },
    Shutdown,
}

/// A snapshot of room metadata (not the game state itself).
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub code: RoomCode,
    pub status: GameStatus,
    pub player_count: usize,
    pub max_players: usize,
    /// How long ago the game finished, if it has.
    pub finished_for: Option<Duration>,
}

/// Handle to a running room actor. Cheap to clone — just an
/// `mpsc::Sender` wrapper. The registry holds one per room.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    fn unavailable(&self) -> RegistryError {
        RegistryError::RoomUnavailable(self.code.clone())
    }

    async fn request<T>(
        &self,
        cmd: RoomCommand,
        reply_rx: oneshot::Receiver<Result<T, GameError>>,
    ) -> Result<T, RegistryError> {
        self.sender.send(cmd).await.map_err(|_| self.unavailable())?;
        let result = reply_rx.await.map_err(|_| self.unavailable())?;
        Ok(result?)
    }

    /// Adds a player to the room.
    pub async fn join(
        &self,
        player_id: PlayerId,
        display_name: String,
        sender: EventSender,
    ) -> Result<(), RegistryError> {
        let (reply, reply_rx) = oneshot::channel();
        let cmd = RoomCommand::Join {
            player_id,
            display_name,
            sender,
            reply,
        };
        self.request(cmd, reply_rx).await
    }

    /// Flips a player's readiness, returning the new value.
    pub async fn toggle_ready(&self, player_id: PlayerId) -> Result<bool, RegistryError> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(RoomCommand::ToggleReady { player_id, reply }, reply_rx)
            .await
    }

    /// Starts the game. Only the host may do this.
    pub async fn start(&self, player_id: PlayerId) -> Result<(), RegistryError> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(RoomCommand::Start { player_id, reply }, reply_rx)
            .await
    }

    /// Submits a play for the acting player.
    pub async fn play(&self, player_id: PlayerId, cards: Vec<Card>) -> Result<(), RegistryError> {
        let (reply, reply_rx) = oneshot::channel();
        let cmd = RoomCommand::Play {
            player_id,
            cards,
            reply,
        };
        self.request(cmd, reply_rx).await
    }

    /// Passes the acting player's turn.
    pub async fn pass(&self, player_id: PlayerId) -> Result<(), RegistryError> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(RoomCommand::Pass { player_id, reply }, reply_rx)
            .await
    }

    /// Removes a player, returning how many remain.
    pub async fn leave(&self, player_id: PlayerId) -> Result<usize, RegistryError> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(RoomCommand::Leave { player_id, reply }, reply_rx)
            .await
    }

    /// Requests the current room info.
    pub async fn get_info(&self) -> Result<RoomInfo, RegistryError> {
        let (reply, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::GetInfo { reply })
            .await
            .map_err(|_| self.unavailable())?;
        reply_rx.await.map_err(|_| self.unavailable())
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RegistryError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| self.unavailable())
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor<G: GameSession> {
    code: RoomCode,
    game: G,
    /// Per-player outbound channels.
    senders: HashMap<PlayerId, EventSender>,
    finished_at: Option<Instant>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl<G: GameSession> RoomActor<G> {
    /// Runs the actor loop, processing commands until shutdown.
    ///
    /// For every failed action the acting player gets a wire `error`
    /// event in addition to the command reply; broadcasts always go
    /// out before the reply, so a caller that has awaited the reply
    /// can observe them.
    async fn run(mut self) {
        tracing::info!(code = %self.code, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    player_id,
                    display_name,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(player_id, display_name, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::ToggleReady { player_id, reply } => {
                    let result = self.handle_toggle_ready(player_id);
                    self.report_failure(player_id, &result);
                    let _ = reply.send(result);
                }
                RoomCommand::Start { player_id, reply } => {
                    let result = self.handle_start(player_id);
                    self.report_failure(player_id, &result);
                    let _ = reply.send(result);
                }
                RoomCommand::Play {
                    player_id,
                    cards,
                    reply,
                } => {
                    let result = self.handle_play(player_id, cards);
                    self.report_failure(player_id, &result);
                    let _ = reply.send(result);
                }
                RoomCommand::Pass { player_id, reply } => {
                    let result = self.handle_pass(player_id);
                    self.report_failure(player_id, &result);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave { player_id, reply } => {
                    let result = self.handle_leave(player_id);
                    let _ = reply.send(result);
                }
                RoomCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Shutdown => {
                    tracing::info!(code = %self.code, "room shutting down");
                    break;
                }
            }
        }

        tracing::info!(code = %self.code, "room actor stopped");
    }

    fn handle_join(
        &mut self,
        player_id: PlayerId,
        display_name: String,
        sender: EventSender,
    ) -> Result<(), GameError> {
        let position = self.game.player_count();
        let player = Player::new(player_id, display_name, position, false);
        if let Err(err) = self.game.add_player(player) {
            // Not a member yet, so the error goes out on the channel
            // the join request carried.
            let _ = sender.send(ServerEvent::Error {
                code: err.code().into(),
                message: err.to_string(),
            });
            return Err(err);
        }
        self.senders.insert(player_id, sender);

        tracing::info!(
            code = %self.code,
            %player_id,
            players = self.game.player_count(),
            "player joined"
        );

        if let Some(player) = self.game.player(player_id) {
            self.dispatch(
                Recipient::AllExcept(player_id),
                ServerEvent::PlayerJoined {
                    player: player.public(),
                },
            );
        }
        if let Some(view) = self.game.player_view(player_id) {
            self.dispatch(
                Recipient::Player(player_id),
                ServerEvent::GameJoined { player_id, view },
            );
        }
        Ok(())
    }

    fn handle_toggle_ready(&mut self, player_id: PlayerId) -> Result<bool, GameError> {
        let is_ready = self.game.toggle_ready(player_id)?;
        self.dispatch(
            Recipient::All,
            ServerEvent::ReadyChanged {
                player_id,
                is_ready,
            },
        );
        Ok(is_ready)
    }

    fn handle_start(&mut self, player_id: PlayerId) -> Result<(), GameError> {
        let host = self
            .game
            .player(player_id)
            .ok_or(GameError::InvalidPlayer(player_id))?;
        if !host.is_host {
            return Err(GameError::NotHost);
        }

        self.game.start()?;
        tracing::info!(
            code = %self.code,
            players = self.game.player_count(),
            "game started"
        );

        self.dispatch(
            Recipient::All,
            ServerEvent::GameStarted {
                snapshot: self.game.snapshot(),
            },
        );
        self.send_views();
        Ok(())
    }

    fn handle_play(&mut self, player_id: PlayerId, cards: Vec<Card>) -> Result<(), GameError> {
        let outcome = self.game.play_cards(player_id, cards)?;

        self.dispatch(
            Recipient::All,
            ServerEvent::CardsPlayed {
                player_id,
                cards: outcome.cards,
            },
        );
        self.send_views();

        if let Some(rankings) = outcome.rankings {
            self.finished_at = Some(Instant::now());
            tracing::info!(code = %self.code, "game finished");
            self.dispatch(Recipient::All, ServerEvent::GameOver { rankings });
        } else if let Some(next) = outcome.next_player {
            self.dispatch(
                Recipient::All,
                ServerEvent::TurnChanged {
                    current_player_id: next,
                },
            );
        }
        Ok(())
    }

    fn handle_pass(&mut self, player_id: PlayerId) -> Result<(), GameError> {
        let outcome = self.game.pass_turn(player_id)?;
        self.dispatch(
            Recipient::All,
            ServerEvent::TurnChanged {
                current_player_id: outcome.next_player,
            },
        );
        self.send_views();
        Ok(())
    }

    fn handle_leave(&mut self, player_id: PlayerId) -> Result<usize, GameError> {
        self.game.remove_player(player_id)?;
        self.senders.remove(&player_id);

        tracing::info!(
            code = %self.code,
            %player_id,
            players = self.game.player_count(),
            "player left"
        );

        self.dispatch(Recipient::All, ServerEvent::PlayerLeft { player_id });

        if self.game.status() == GameStatus::Finished && self.finished_at.is_none() {
            // The departure left a single unfinished player, which
            // ends the game for everyone still seated.
            self.finished_at = Some(Instant::now());
            tracing::info!(code = %self.code, "game finished");
            self.send_views();
            let rankings = self.rankings();
            self.dispatch(Recipient::All, ServerEvent::GameOver { rankings });
        } else if self.game.status().is_active() {
            // Mid-game departures can move the turn pointer; the table
            // needs to see the new state.
            self.send_views();
            if let Some(current) = self.game.current_player_id() {
                self.dispatch(
                    Recipient::All,
                    ServerEvent::TurnChanged {
                        current_player_id: current,
                    },
                );
            }
        }

        Ok(self.game.player_count())
    }

    /// Rankings in finish order for the seated players.
    fn rankings(&self) -> Vec<Ranking> {
        self.game
            .snapshot()
            .finish_order
            .iter()
            .filter_map(|id| {
                self.game.player(*id).map(|p| Ranking {
                    player_id: *id,
                    rank: p.rank,
                })
            })
            .collect()
    }

    /// Sends each participant their own `game-state` view.
    fn send_views(&self) {
        for (player_id, sender) in &self.senders {
            if let Some(view) = self.game.player_view(*player_id) {
                let _ = sender.send(ServerEvent::GameState { view });
            }
        }
    }

    /// Sends a wire `error` event to the acting player when a command
    /// failed.
    fn report_failure<T>(&self, player_id: PlayerId, result: &Result<T, GameError>) {
        if let Err(err) = result {
            self.send_to(
                player_id,
                ServerEvent::Error {
                    code: err.code().into(),
                    message: err.to_string(),
                },
            );
        }
    }

    /// Dispatches an event to the recipients it is addressed to.
    fn dispatch(&self, recipient: Recipient, event: ServerEvent) {
        match recipient {
            Recipient::All => {
                for sender in self.senders.values() {
                    let _ = sender.send(event.clone());
                }
            }
            Recipient::Player(player_id) => {
                self.send_to(player_id, event);
            }
            Recipient::AllExcept(excluded) => {
                for (player_id, sender) in &self.senders {
                    if *player_id != excluded {
                        let _ = sender.send(event.clone());
                    }
                }
            }
        }
    }

    /// Sends an event to a single participant. Silently drops if the
    /// receiver is gone (participant disconnected).
    fn send_to(&self, player_id: PlayerId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&player_id) {
            let _ = sender.send(event);
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            code: self.code.clone(),
            status: self.game.status(),
            player_count: self.game.player_count(),
            max_players: self.game.config().max_players,
            finished_for: self.finished_at.map(|at| at.elapsed()),
        }
    }
}

/// Spawns a new room actor with the creating player already seated as
/// host, and returns a handle plus the host's id.
///
/// The `game-created` event and the host's first `game-state` view are
/// sent before the actor task starts, so they are already queued when
/// this returns. `channel_size` bounds the command channel; a full
/// channel makes senders wait.
pub(crate) fn spawn_room<G: GameSession>(
    code: RoomCode,
    config: GameConfig,
    host_name: String,
    host_sender: EventSender,
    channel_size: usize,
) -> (RoomHandle, PlayerId) {
    let host_id = PlayerId::random();
    let mut game = G::create(code.to_string(), config);

    let mut host = Player::new(host_id, host_name, 0, true);
    host.set_ready(true);
    game.add_player(host)
        .expect("a fresh lobby always seats the host");

    let _ = host_sender.send(ServerEvent::GameCreated {
        room_code: code.clone(),
        player_id: host_id,
    });
    if let Some(view) = game.player_view(host_id) {
        let _ = host_sender.send(ServerEvent::GameState { view });
    }

    let (tx, rx) = mpsc::channel(channel_size);
    let actor = RoomActor {
        code: code.clone(),
        game,
        senders: HashMap::from([(host_id, host_sender)]),
        finished_at: None,
        receiver: rx,
    };
    tokio::spawn(actor.run());

    (RoomHandle { code, sender: tx }, host_id)
}
