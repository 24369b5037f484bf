//! In-memory stores owning live state.

pub mod room;
pub mod story;

pub use room::RoomStore;
pub use story::StoryRegistry;
