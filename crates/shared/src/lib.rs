//! Turtlesoup Protocol - Shared types between the engine core and
//! transport adapters.
//!
//! This crate contains everything a transport layer (HTTP polling endpoints,
//! a socket channel, a test harness) needs to drive the core:
//! - Room commands (`RoomRequest`)
//! - Snapshot and engine-result DTOs
//! - The response envelope with typed error codes
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde, uuid, chrono, and the domain
//!    vocabulary enums only
//! 2. **No business logic** - pure data types and serialization
//! 3. **Transport-agnostic** - whether updates are pulled or pushed is an
//!    adapter concern, not part of this contract

pub mod dto;
pub mod requests;
pub mod responses;

pub use dto::{
    AuthorData, ChatMessageData, ClueData, CommandOutcome, EngineResultData, GuessOutcome,
    HintOutcome, PlayerData, PlayerJoined, QuestionOutcome, RoomCreated, RoomStateData,
};
pub use requests::RoomRequest;
pub use responses::{ErrorCode, ResponseResult};
