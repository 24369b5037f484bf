//! Chat log entries - append-only, immutable once appended

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::verdict::Answer;
use crate::{MessageId, PlayerId};

/// Display name used for narrator-authored entries.
pub const NARRATOR_NAME: &str = "AI主持人";

/// Display name used for system-authored entries.
pub const SYSTEM_NAME: &str = "系统";

/// Who authored a chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ChatAuthor {
    Player(PlayerId),
    Narrator,
    System,
}

/// What kind of entry this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Question,
    Answer,
    Guess,
    Hint,
    System,
}

/// One entry in a room's chronological chat history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: ChatAuthor,
    pub author_name: String,
    pub body: String,
    pub kind: MessageKind,
    pub timestamp: DateTime<Utc>,
    /// Narrator classification tag, present on answer entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Answer>,
}

impl ChatMessage {
    /// A player-authored entry (question, guess, or hint request).
    pub fn player(
        player_id: PlayerId,
        player_name: impl Into<String>,
        body: impl Into<String>,
        kind: MessageKind,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            author: ChatAuthor::Player(player_id),
            author_name: player_name.into(),
            body: body.into(),
            kind,
            timestamp,
            verdict: None,
        }
    }

    /// A narrator-authored entry (answer, guess result, or hint).
    pub fn narrator(body: impl Into<String>, kind: MessageKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            author: ChatAuthor::Narrator,
            author_name: NARRATOR_NAME.to_string(),
            body: body.into(),
            kind,
            timestamp,
            verdict: None,
        }
    }

    /// A system-authored entry (game start announcement and the like).
    pub fn system(body: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            author: ChatAuthor::System,
            author_name: SYSTEM_NAME.to_string(),
            body: body.into(),
            kind: MessageKind::System,
            timestamp,
            verdict: None,
        }
    }

    /// Attach the narrator's classification tag.
    pub fn with_verdict(mut self, verdict: Answer) -> Self {
        self.verdict = Some(verdict);
        self
    }
}
