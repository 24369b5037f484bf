//! Fallback wrapper: remote delegate with deterministic local recovery.
//!
//! Wraps any narrator implementation and degrades to the local heuristics
//! on any error, so the question/guess/hint paths can never see a failure
//! and a player's chat entry is never left without a response.

use std::sync::Arc;

use async_trait::async_trait;

use turtlesoup_domain::Story;

use super::heuristic::HeuristicNarrator;
use crate::infrastructure::ports::{
    GuessVerdict, NarratorError, NarratorPort, QuestionVerdict,
};

/// Wrapper that adds local-fallback behavior to any narrator.
pub struct FallbackNarrator {
    delegate: Arc<dyn NarratorPort>,
    local: HeuristicNarrator,
}

impl FallbackNarrator {
    pub fn new(delegate: Arc<dyn NarratorPort>, local: HeuristicNarrator) -> Self {
        Self { delegate, local }
    }
}

#[async_trait]
impl NarratorPort for FallbackNarrator {
    async fn answer_question(
        &self,
        question: &str,
        story: &Story,
    ) -> Result<QuestionVerdict, NarratorError> {
        match self.delegate.answer_question(question, story).await {
            Ok(verdict) => Ok(verdict),
            Err(error) => {
                tracing::warn!(%error, "narrator delegate failed, answering locally");
                self.local.answer_question(question, story).await
            }
        }
    }

    async fn evaluate_guess(
        &self,
        guess: &str,
        story: &Story,
    ) -> Result<GuessVerdict, NarratorError> {
        match self.delegate.evaluate_guess(guess, story).await {
            Ok(verdict) => Ok(verdict),
            Err(error) => {
                tracing::warn!(%error, "narrator delegate failed, grading locally");
                self.local.evaluate_guess(guess, story).await
            }
        }
    }

    async fn generate_hint(
        &self,
        story: &Story,
        discovered_clues: &[String],
    ) -> Result<String, NarratorError> {
        match self.delegate.generate_hint(story, discovered_clues).await {
            Ok(hint) => Ok(hint),
            Err(error) => {
                tracing::warn!(%error, "narrator delegate failed, hinting locally");
                self.local.generate_hint(story, discovered_clues).await
            }
        }
    }
}
