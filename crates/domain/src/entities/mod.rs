//! Domain entities.

mod chat;
mod clue;
mod player;
mod room;
mod story;
mod verdict;

pub use chat::{ChatAuthor, ChatMessage, MessageKind, NARRATOR_NAME, SYSTEM_NAME};
pub use clue::Clue;
pub use player::Player;
pub use room::{Room, RoomStatus, DEFAULT_MAX_PLAYERS, EXPIRY_WINDOW_HOURS};
pub use story::{Archetype, Story, FALLBACK_SOLUTION};
pub use verdict::{Answer, GuessBand};
