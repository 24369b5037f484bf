//! Value objects with validation and invariants built in.

mod health;
mod names;

pub use health::{Health, DEFAULT_MAX_HEALTH};
pub use names::{PlayerName, RoomCode};
