//! Story entity - the hidden scenario players must deduce
//!
//! The surface prompt (汤面) is public once a game starts; the solution
//! (汤底) stays private until a correct guess reveals it.

use serde::{Deserialize, Serialize};

use crate::StoryId;

/// Coarse story category used to pick flavor hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Cannibalism,
    Sacrifice,
    Physical,
    Poison,
    Medical,
    Survival,
    General,
}

impl Archetype {
    /// Classify a story by substring cues. Used for custom stories that
    /// carry no explicit tag; registry records are tagged at registration.
    pub fn classify(text: &str) -> Self {
        const CUES: &[(Archetype, &[&str])] = &[
            (Archetype::Cannibalism, &["人肉", "吃人", "同伴的尸体"]),
            (Archetype::Sacrifice, &["牺牲", "救", "血液", "为了让"]),
            (Archetype::Poison, &["毒", "河豚", "中毒"]),
            (Archetype::Medical, &["打嗝", "病", "医"]),
            (Archetype::Physical, &["侏儒", "按钮", "楼梯", "身高"]),
            (Archetype::Survival, &["沙漠", "迷路", "海上", "遇难"]),
        ];

        for (archetype, cues) in CUES {
            if cues.iter().any(|cue| text.contains(cue)) {
                return *archetype;
            }
        }
        Archetype::General
    }
}

/// Generic explanation revealed for stories without a curated solution.
pub const FALLBACK_SOLUTION: &str = "这是一个关于逻辑推理的故事，需要仔细分析每个细节。";

/// A registry record: id, surface prompt, full solution, archetype tag.
///
/// Stories are looked up by id, never by exact prompt text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: StoryId,
    pub prompt: String,
    pub solution: String,
    pub archetype: Archetype,
}

impl Story {
    pub fn new(
        prompt: impl Into<String>,
        solution: impl Into<String>,
        archetype: Archetype,
    ) -> Self {
        Self {
            id: StoryId::new(),
            prompt: prompt.into(),
            solution: solution.into(),
            archetype,
        }
    }

    /// A custom story; archetype classified by cue from whatever text is
    /// available. The solution may be empty, in which case a correct guess
    /// reveals the generic fallback explanation.
    pub fn custom(prompt: impl Into<String>, solution: impl Into<String>) -> Self {
        let prompt = prompt.into();
        let solution = solution.into();
        let archetype = Archetype::classify(if solution.trim().is_empty() {
            &prompt
        } else {
            &solution
        });
        Self {
            id: StoryId::new(),
            prompt,
            solution,
            archetype,
        }
    }

    /// The text revealed on a correct guess.
    pub fn reveal(&self) -> &str {
        if self.solution.trim().is_empty() {
            FALLBACK_SOLUTION
        } else {
            &self.solution
        }
    }
}
