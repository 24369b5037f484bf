//! Clue entity - a discrete discovered fact, distinct from chat messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ClueId, PlayerId};

/// A fact surfaced during play. Append-only per room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clue {
    pub id: ClueId,
    pub title: String,
    pub description: String,
    pub discovered_by: PlayerId,
    pub discovered_at: DateTime<Utc>,
}

impl Clue {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        discovered_by: PlayerId,
        discovered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ClueId::new(),
            title: title.into(),
            description: description.into(),
            discovered_by,
            discovered_at,
        }
    }
}
