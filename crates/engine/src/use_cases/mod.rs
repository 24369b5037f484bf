//! Command orchestration over the stores and the narrator.

pub mod lobby;
pub mod play;
pub mod snapshot;

#[cfg(test)]
mod flow_tests;

pub use lobby::LobbyUseCases;
pub use play::PlayUseCases;

use turtlesoup_domain::{DomainError, Room, RoomCode};

use crate::stores::StoryRegistry;

/// Parse a client-supplied room id. Garbage codes read as not-found, the
/// same as well-formed codes for rooms that never existed.
pub(crate) fn parse_code(room_id: &str) -> Result<RoomCode, DomainError> {
    RoomCode::parse(room_id).map_err(|_| DomainError::room_not_found(room_id))
}

/// The surface prompt for a room's story, or empty when unregistered.
pub(crate) fn story_prompt(registry: &StoryRegistry, room: &Room) -> String {
    registry
        .get(room.story_id())
        .map(|story| story.prompt.clone())
        .unwrap_or_default()
}
