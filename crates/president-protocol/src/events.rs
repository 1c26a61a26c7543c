//! The message contract between the game core and its transport.
//!
//! The transport collaborator (a websocket layer, a test harness, a
//! bot runner) turns inbound frames into [`ClientEvent`]s and delivers
//! [`ServerEvent`]s to the recipients the room layer names. Events are
//! internally tagged so the JSON reads `{"type": "play-cards", ...}`.

use serde::{Deserialize, Serialize};

use president_core::{Card, GameSnapshot, PlayerId, PlayerView, PublicPlayer, Ranking};

use crate::RoomCode;

/// Who should receive a server event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Every participant in the room.
    All,
    /// One specific participant.
    Player(PlayerId),
    /// Everyone except the named participant, e.g. "a new player
    /// joined" goes to the others.
    AllExcept(PlayerId),
}

/// Actions a participant can submit. The acting player is implied by
/// the connection; only `create-game` and `join-game` are valid before
/// an identity exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    CreateGame {
        display_name: String,
        /// Defaults to the variant's standard table size when absent.
        max_players: Option<usize>,
    },
    JoinGame {
        room_code: RoomCode,
        display_name: String,
    },
    ToggleReady,
    StartGame,
    PlayCards {
        cards: Vec<Card>,
    },
    PassTurn,
    LeaveGame,
}

/// Events the server emits. Per-player state (`game-state`) carries
/// only the recipient's own hand; everything else is public.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    GameCreated {
        room_code: RoomCode,
        player_id: PlayerId,
    },
    GameJoined {
        player_id: PlayerId,
        view: PlayerView,
    },
    PlayerJoined {
        player: PublicPlayer,
    },
    PlayerLeft {
        player_id: PlayerId,
    },
    #[serde(rename = "player-ready-update")]
    ReadyChanged {
        player_id: PlayerId,
        is_ready: bool,
    },
    GameStarted {
        snapshot: GameSnapshot,
    },
    GameState {
        view: PlayerView,
    },
    CardsPlayed {
        player_id: PlayerId,
        cards: Vec<Card>,
    },
    #[serde(rename = "turn-change")]
    TurnChanged {
        current_player_id: PlayerId,
    },
    #[serde(rename = "game-end")]
    GameOver {
        rankings: Vec<Ranking>,
    },
    /// Sent only to the participant whose action failed.
    Error {
        code: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use president_core::{Card, Rank, Suit};

    #[test]
    fn test_client_event_tags_are_kebab_case() {
        let event = ClientEvent::CreateGame {
            display_name: "ana".into(),
            max_players: Some(4),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "create-game");
        assert_eq!(json["display_name"], "ana");
        assert_eq!(json["max_players"], 4);

        let json = serde_json::to_value(&ClientEvent::PassTurn).unwrap();
        assert_eq!(json["type"], "pass-turn");
    }

    #[test]
    fn test_play_cards_round_trip() {
        let event = ClientEvent::PlayCards {
            cards: vec![
                Card::new(Rank::Seven, Suit::Hearts),
                Card::new(Rank::Seven, Suit::Clubs),
            ],
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: ClientEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_join_game_normalizes_room_code() {
        let json = r#"{"type": "join-game", "room_code": "abcdef", "display_name": "ben"}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        match event {
            ClientEvent::JoinGame { room_code, .. } => {
                assert_eq!(room_code.as_str(), "ABCDEF");
            }
            other => panic!("expected join-game, got {other:?}"),
        }
    }

    #[test]
    fn test_server_event_renamed_tags() {
        let event = ServerEvent::ReadyChanged {
            player_id: PlayerId::random(),
            is_ready: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "player-ready-update");

        let event = ServerEvent::TurnChanged {
            current_player_id: PlayerId::random(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "turn-change");

        let event = ServerEvent::GameOver { rankings: vec![] };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "game-end");
    }

    #[test]
    fn test_error_event_shape() {
        let event = ServerEvent::Error {
            code: "not_your_turn".into(),
            message: "not your turn".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], "not_your_turn");
    }

    #[test]
    fn test_unknown_event_type_rejected() {
        let json = r#"{"type": "fly-to-moon"}"#;
        assert!(serde_json::from_str::<ClientEvent>(json).is_err());
    }
}
