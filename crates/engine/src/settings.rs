//! Engine settings loaded from the environment.
//!
//! The narrator strategy is fixed here at construction time; there is no
//! runtime reconfiguration path.

use crate::narrator::llm::{
    DEFAULT_NARRATOR_BASE_URL, DEFAULT_NARRATOR_MODEL, DEFAULT_NARRATOR_TIMEOUT_SECS,
};

/// Which narrator implementation answers questions, grades guesses, and
/// produces hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarratorMode {
    /// Deterministic local heuristics only.
    Local,
    /// LLM delegate with local fallback.
    Remote,
}

/// Process-level configuration.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub narrator_mode: NarratorMode,
    pub narrator_base_url: String,
    pub narrator_model: String,
    pub narrator_timeout_secs: u64,
    /// Cadence of the expired-room sweep.
    pub sweep_interval_secs: u64,
}

impl EngineSettings {
    /// Load settings from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let narrator_mode = match std::env::var("NARRATOR_MODE").as_deref() {
            Ok("remote") => NarratorMode::Remote,
            _ => NarratorMode::Local,
        };
        let narrator_base_url = std::env::var("NARRATOR_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_NARRATOR_BASE_URL.to_string());
        let narrator_model =
            std::env::var("NARRATOR_MODEL").unwrap_or_else(|_| DEFAULT_NARRATOR_MODEL.to_string());
        let narrator_timeout_secs = std::env::var("NARRATOR_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_NARRATOR_TIMEOUT_SECS);
        let sweep_interval_secs = std::env::var("SWEEP_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(600);

        Self {
            narrator_mode,
            narrator_base_url,
            narrator_model,
            narrator_timeout_secs,
            sweep_interval_secs,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            narrator_mode: NarratorMode::Local,
            narrator_base_url: DEFAULT_NARRATOR_BASE_URL.to_string(),
            narrator_model: DEFAULT_NARRATOR_MODEL.to_string(),
            narrator_timeout_secs: DEFAULT_NARRATOR_TIMEOUT_SECS,
            sweep_interval_secs: 600,
        }
    }
}
