//! Command types consumed by the core
//!
//! Transport adapters (HTTP polling, sockets) translate client actions into
//! these requests; how the bytes arrive is purely an adapter concern.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client-initiated room command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomRequest {
    CreateRoom {
        host_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_players: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_limit_minutes: Option<u32>,
    },
    JoinRoom {
        room_id: String,
        player_name: String,
    },
    ToggleReady {
        room_id: String,
        player_id: Uuid,
    },
    StartGame {
        room_id: String,
        player_id: Uuid,
    },
    LeaveRoom {
        room_id: String,
        player_id: Uuid,
    },
    SubmitQuestion {
        room_id: String,
        player_id: Uuid,
        question: String,
    },
    SubmitGuess {
        room_id: String,
        player_id: Uuid,
        guess: String,
    },
    RequestHint {
        room_id: String,
        player_id: Uuid,
    },
    AdvanceTurn {
        room_id: String,
    },
    EndGame {
        room_id: String,
    },
    GetState {
        room_id: String,
    },
}
