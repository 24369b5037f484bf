//! Validated newtypes for player names and room codes
//!
//! These newtypes ensure values are valid by construction:
//! - Names are non-empty and within length limits, trimmed of whitespace
//! - Room codes are exactly 8 lowercase hex characters

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use uuid::Uuid;

/// Maximum length for player display names
const MAX_NAME_LENGTH: usize = 32;

/// Length of a room code (first segment of a UUID v4, hyphen excluded)
const ROOM_CODE_LENGTH: usize = 8;

// ============================================================================
// PlayerName
// ============================================================================

/// A validated player display name (non-empty, <=32 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Create a new validated player name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 32 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Player name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Player name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

// ============================================================================
// RoomCode
// ============================================================================

/// A short human-shareable room code (8 lowercase hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Generate a fresh room code from a UUID v4.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self(uuid[..ROOM_CODE_LENGTH].to_string())
    }

    /// Parse a code supplied by a client.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless the input is exactly 8
    /// lowercase hex characters (uppercase input is folded).
    pub fn parse(code: impl Into<String>) -> Result<Self, DomainError> {
        let code = code.into().trim().to_lowercase();
        if code.len() != ROOM_CODE_LENGTH || !code.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::validation(format!(
                "Room code must be {} hex characters",
                ROOM_CODE_LENGTH
            )));
        }
        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RoomCode {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}
