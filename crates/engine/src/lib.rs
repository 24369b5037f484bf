//! Turtlesoup Engine library.
//!
//! This crate contains all server-side logic for the turtle-soup deduction
//! game.
//!
//! ## Structure
//!
//! - `stores/` - room store and story registry (all live state)
//! - `narrator/` - answer-classification engines: local heuristics, LLM
//!   delegate, fallback wrapper
//! - `use_cases/` - command orchestration over stores and narrator
//! - `infrastructure/` - port traits and clock/random adapters
//! - `app` - application composition
//!
//! Transports are external collaborators: they drive the core through the
//! `turtlesoup_shared` request/response contract and are free to poll or
//! push.

pub mod app;
pub mod infrastructure;
pub mod narrator;
pub mod settings;
pub mod stores;
pub mod use_cases;

pub use app::App;
pub use settings::{EngineSettings, NarratorMode};
