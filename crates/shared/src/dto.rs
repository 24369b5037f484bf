//! Wire-format DTOs for room state snapshots and engine results
//!
//! Pure data types: raw `Uuid`s and strings on the wire, vocabulary enums
//! reused from the domain crate, no business logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use turtlesoup_domain::{Answer, GuessBand, MessageKind, RoomStatus};

/// A roster member as seen by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    pub id: Uuid,
    pub name: String,
    pub health: u32,
    pub is_ready: bool,
    pub is_host: bool,
}

/// Chat entry author discriminator on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorData {
    Player,
    Narrator,
    System,
}

/// One chat log entry as seen by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageData {
    pub id: Uuid,
    pub author: AuthorData,
    /// Present when `author` is `Player`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<Uuid>,
    pub author_name: String,
    pub body: String,
    pub kind: MessageKind,
    pub timestamp: DateTime<Utc>,
    /// Narrator classification tag, present on answer entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Answer>,
}

/// A discovered clue as seen by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClueData {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub discovered_by: Uuid,
    pub discovered_at: DateTime<Utc>,
}

/// Full room snapshot. Carries the surface prompt, never the solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStateData {
    pub room_id: String,
    pub players: Vec<PlayerData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_turn: Option<Uuid>,
    pub status: RoomStatus,
    /// The public story surface (汤面).
    pub prompt: String,
    pub discovered_clues: Vec<ClueData>,
    pub chat_history: Vec<ChatMessageData>,
    pub max_health: u32,
    pub time_limit_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_start_time: Option<DateTime<Utc>>,
    /// True once every player has run out of health; the transport decides
    /// when to call EndGame.
    pub all_eliminated: bool,
    /// True once the configured time limit has elapsed; same contract as
    /// `all_eliminated`.
    pub time_expired: bool,
}

/// Narrator verdict for a submitted question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub answer: Answer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Narrator verdict for a submitted guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOutcome {
    pub is_correct: bool,
    pub band: GuessBand,
    pub message: String,
    /// The canonical solution reveal, present on a correct guess.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_story: Option<String>,
}

/// A generated hint and its health cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintOutcome {
    pub hint: String,
    pub cost: u32,
}

/// Engine result of a costed compound operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineResultData {
    Question(QuestionOutcome),
    Guess(GuessOutcome),
    Hint(HintOutcome),
}

/// Result of a compound operation: the two appended chat entries, the
/// engine verdict, and the updated snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutcome {
    pub chat_entries: Vec<ChatMessageData>,
    pub engine_result: EngineResultData,
    pub state: RoomStateData,
}

/// Result of a successful room creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreated {
    pub room_id: String,
    pub state: RoomStateData,
}

/// Result of a successful join.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerJoined {
    pub player: PlayerData,
    pub state: RoomStateData,
}
