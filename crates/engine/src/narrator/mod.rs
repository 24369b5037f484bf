//! Narrator engines.
//!
//! The local heuristics are the deterministic baseline; the LLM delegate is
//! optional and always wrapped with fallback so play never stalls on an
//! unreachable or misbehaving model.

pub mod concepts;
pub mod fallback;
pub mod heuristic;
pub mod llm;
pub mod text;

pub use fallback::FallbackNarrator;
pub use heuristic::HeuristicNarrator;
pub use llm::LlmNarrator;
