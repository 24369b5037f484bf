//! Remote narrator delegate (OpenAI-compatible chat API).
//!
//! Works against any endpoint speaking the `/v1/chat/completions` dialect
//! (Ollama included). Treated as unreliable by contract: every error maps to
//! `NarratorError` and callers fall back to the local heuristics.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use turtlesoup_domain::{Answer, GuessBand, Story};

use super::heuristic::REPHRASE_GUIDANCE;
use crate::infrastructure::ports::{
    GuessVerdict, NarratorError, NarratorPort, QuestionVerdict,
};

/// Default base URL (Ollama's local endpoint).
pub const DEFAULT_NARRATOR_BASE_URL: &str = "http://localhost:11434";

/// Default model.
pub const DEFAULT_NARRATOR_MODEL: &str = "llama3.2";

/// Default request timeout. Callers fall back to the local heuristics once
/// it elapses.
pub const DEFAULT_NARRATOR_TIMEOUT_SECS: u64 = 5;

/// Client for an OpenAI-compatible chat completions API.
#[derive(Clone)]
pub struct LlmNarrator {
    client: Client,
    base_url: String,
    model: String,
}

impl LlmNarrator {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self::with_timeout(base_url, model, DEFAULT_NARRATOR_TIMEOUT_SECS)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create a client from `NARRATOR_BASE_URL`, `NARRATOR_MODEL`, and
    /// `NARRATOR_TIMEOUT_SECS`, falling back to defaults if not set.
    pub fn from_env() -> Self {
        let base_url = std::env::var("NARRATOR_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_NARRATOR_BASE_URL.to_string());
        let model =
            std::env::var("NARRATOR_MODEL").unwrap_or_else(|_| DEFAULT_NARRATOR_MODEL.to_string());
        let timeout_secs = std::env::var("NARRATOR_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_NARRATOR_TIMEOUT_SECS);
        Self::with_timeout(&base_url, &model, timeout_secs)
    }

    async fn complete(&self, system: &str, user: String) -> Result<String, NarratorError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ApiMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ApiMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            temperature: 0.3,
            max_tokens: 120,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| NarratorError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| NarratorError::RequestFailed(e.to_string()))?;
            return Err(NarratorError::RequestFailed(error_text));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| NarratorError::InvalidResponse(e.to_string()))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(NarratorError::InvalidResponse("empty completion".to_string()));
        }
        Ok(content)
    }
}

#[async_trait]
impl NarratorPort for LlmNarrator {
    async fn answer_question(
        &self,
        question: &str,
        story: &Story,
    ) -> Result<QuestionVerdict, NarratorError> {
        let system = "你是海龟汤游戏的主持人。根据汤面和汤底回答玩家的是非问题，\
                      只允许回答以下之一：是、不是、接近、无关。";
        let user = format!(
            "汤面：{}\n汤底：{}\n玩家的问题：{}",
            story.prompt, story.solution, question
        );
        let reply = self.complete(system, user).await?;
        let answer = parse_answer(&reply)?;
        // Remote replies carry no structured explanation; reuse the
        // rephrase guidance for irrelevant so the player knows what to do.
        let verdict = match answer {
            Answer::Irrelevant => QuestionVerdict::new(answer, REPHRASE_GUIDANCE),
            _ => QuestionVerdict {
                answer,
                explanation: None,
            },
        };
        Ok(verdict)
    }

    async fn evaluate_guess(
        &self,
        guess: &str,
        story: &Story,
    ) -> Result<GuessVerdict, NarratorError> {
        let system = "你是海龟汤游戏的主持人。判断玩家的猜测与汤底的接近程度，\
                      只允许回答以下之一：正确、接近、方向正确、错误。";
        let user = format!(
            "汤面：{}\n汤底：{}\n玩家的猜测：{}",
            story.prompt, story.solution, guess
        );
        let reply = self.complete(system, user).await?;
        let band = parse_band(&reply)?;
        Ok(GuessVerdict {
            band,
            message: band.message_zh().to_string(),
            // The reveal always comes from the registry record, never from
            // the delegate's prose.
            full_story: band.is_correct().then(|| story.reveal().to_string()),
        })
    }

    async fn generate_hint(
        &self,
        story: &Story,
        discovered_clues: &[String],
    ) -> Result<String, NarratorError> {
        let system = "你是海龟汤游戏的主持人。给玩家一句不剧透汤底的提示，不超过30个字。";
        let user = format!(
            "汤面：{}\n汤底：{}\n已发现的线索：{}",
            story.prompt,
            story.solution,
            if discovered_clues.is_empty() {
                "（无）".to_string()
            } else {
                discovered_clues.join("、")
            }
        );
        let reply = self.complete(system, user).await?;
        Ok(reply.trim().to_string())
    }
}

/// Lenient keyword parse of the delegate's answer.
fn parse_answer(reply: &str) -> Result<Answer, NarratorError> {
    let reply = reply.trim();
    // "不是" must be checked before "是".
    if reply.contains("不是") {
        Ok(Answer::No)
    } else if reply.contains("接近") {
        Ok(Answer::Close)
    } else if reply.contains("无关") {
        Ok(Answer::Irrelevant)
    } else if reply.contains('是') || reply.to_lowercase().contains("yes") {
        Ok(Answer::Yes)
    } else if reply.to_lowercase().contains("no") {
        Ok(Answer::No)
    } else {
        Err(NarratorError::InvalidResponse(format!(
            "unrecognized answer: {reply}"
        )))
    }
}

/// Lenient keyword parse of the delegate's guess grade.
fn parse_band(reply: &str) -> Result<GuessBand, NarratorError> {
    let reply = reply.trim();
    // "方向正确" must be checked before "正确".
    if reply.contains("方向正确") || reply.contains("方向对") {
        Ok(GuessBand::RightDirection)
    } else if reply.contains("正确") || reply.contains("猜对") {
        Ok(GuessBand::Correct)
    } else if reply.contains("接近") {
        Ok(GuessBand::Close)
    } else if reply.contains("错误") || reply.contains("猜错") {
        Ok(GuessBand::Incorrect)
    } else {
        Err(NarratorError::InvalidResponse(format!(
            "unrecognized grade: {reply}"
        )))
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}
