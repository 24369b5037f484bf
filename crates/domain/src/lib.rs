//! Turtlesoup domain crate.
//!
//! Core game types, value objects, and invariants. Pure by design: no
//! async, no I/O, no RNG — time enters through method parameters so the
//! engine can inject a clock.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    Answer, Archetype, ChatAuthor, ChatMessage, Clue, GuessBand, MessageKind, Player, Room,
    RoomStatus, Story, DEFAULT_MAX_PLAYERS, EXPIRY_WINDOW_HOURS, FALLBACK_SOLUTION, NARRATOR_NAME,
    SYSTEM_NAME,
};

pub use error::DomainError;

pub use ids::{ClueId, MessageId, PlayerId, StoryId};

pub use value_objects::{Health, PlayerName, RoomCode, DEFAULT_MAX_HEALTH};
