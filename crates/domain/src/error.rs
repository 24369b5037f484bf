//! Unified error types for the domain layer
//!
//! Provides a common error type used across all room operations, enabling
//! consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for room and roster operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Room does not exist (or was already reclaimed)
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// Player is not in the room's roster
    #[error("Player not found in room {room}: {player}")]
    PlayerNotFound { room: String, player: String },

    /// Roster is at capacity
    #[error("Room {room} is full: {current}/{max} players")]
    RoomFull {
        room: String,
        current: usize,
        max: usize,
    },

    /// Join attempted after the game left the waiting state
    #[error("Game in room {0} has already started")]
    GameAlreadyStarted(String),

    /// Action attempted in the wrong room status
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Costed action attempted at zero health
    #[error("Player {0} is eliminated and cannot act")]
    PlayerEliminated(String),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a room-not-found error.
    pub fn room_not_found(room: impl Into<String>) -> Self {
        Self::RoomNotFound(room.into())
    }

    /// Create a player-not-found error.
    pub fn player_not_found(room: impl Into<String>, player: impl ToString) -> Self {
        Self::PlayerNotFound {
            room: room.into(),
            player: player.to_string(),
        }
    }

    /// Create an invalid-state error.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Check if this is a not-found error (room or player).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RoomNotFound(_) | Self::PlayerNotFound { .. })
    }
}
