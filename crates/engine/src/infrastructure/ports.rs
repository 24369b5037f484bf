//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Narrator calls (could swap the local heuristics for an LLM delegate)
//! - Clock/Random (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use turtlesoup_domain::{Answer, GuessBand, Story};

// =============================================================================
// Narrator Types
// =============================================================================

/// The narrator's classification of a submitted question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionVerdict {
    pub answer: Answer,
    /// Short canned explanation for the chosen bucket.
    pub explanation: Option<String>,
}

impl QuestionVerdict {
    pub fn new(answer: Answer, explanation: impl Into<String>) -> Self {
        Self {
            answer,
            explanation: Some(explanation.into()),
        }
    }
}

/// The narrator's graded verdict on a solution guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessVerdict {
    pub band: GuessBand,
    pub message: String,
    /// The canonical solution reveal; present only on a correct guess.
    pub full_story: Option<String>,
}

impl GuessVerdict {
    pub fn is_correct(&self) -> bool {
        self.band.is_correct()
    }
}

/// Narrator operation errors.
///
/// These never reach clients on question/guess/hint paths: callers must
/// recover with the local heuristic engine.
#[derive(Debug, thiserror::Error)]
pub enum NarratorError {
    /// Network or HTTP-level failure talking to the delegate
    #[error("Narrator request failed: {0}")]
    RequestFailed(String),

    /// The delegate replied with something we cannot interpret
    #[error("Narrator returned an unusable reply: {0}")]
    InvalidResponse(String),
}

/// Answer-classification engine behind the compound room operations.
///
/// Implementations: the deterministic local heuristics, the remote LLM
/// delegate, and the fallback wrapper combining the two. The strategy is
/// chosen at construction from settings and never mutated at runtime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NarratorPort: Send + Sync {
    /// Classify a yes/no question against the hidden story.
    async fn answer_question(
        &self,
        question: &str,
        story: &Story,
    ) -> Result<QuestionVerdict, NarratorError>;

    /// Grade a free-text guess against the hidden story.
    async fn evaluate_guess(
        &self,
        guess: &str,
        story: &Story,
    ) -> Result<GuessVerdict, NarratorError>;

    /// Produce a hint given the story and the clue titles found so far.
    async fn generate_hint(
        &self,
        story: &Story,
        discovered_clues: &[String],
    ) -> Result<String, NarratorError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// Inclusive range pick.
    fn gen_range(&self, min: i32, max: i32) -> i32;
}
