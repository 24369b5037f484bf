//! Narrator verdict vocabulary shared across chat log and engines

use serde::{Deserialize, Serialize};

/// The narrator's answer to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    Close,
    Irrelevant,
}

impl Answer {
    /// Player-facing display string.
    pub fn display_zh(&self) -> &'static str {
        match self {
            Answer::Yes => "是",
            Answer::No => "不是",
            Answer::Close => "你已经接近了",
            Answer::Irrelevant => "无关",
        }
    }
}

/// Graded outcome of a solution guess. Bands are non-overlapping and
/// evaluated high-to-low, so exactly one applies to any score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessBand {
    /// The guess resolves the story; the full solution is revealed.
    Correct,
    /// Close but not precise enough.
    Close,
    /// Right direction, wrong details.
    RightDirection,
    /// Not even close.
    Incorrect,
}

impl GuessBand {
    pub fn is_correct(&self) -> bool {
        matches!(self, GuessBand::Correct)
    }

    /// Player-facing graded message.
    pub fn message_zh(&self) -> &'static str {
        match self {
            GuessBand::Correct => "恭喜！你猜对了！",
            GuessBand::Close => "很接近了，但还不够准确。",
            GuessBand::RightDirection => "方向是对的，但细节不对。",
            GuessBand::Incorrect => "猜错了，继续努力！",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_serialize_to_wire_vocabulary() {
        assert_eq!(
            serde_json::to_string(&Answer::Irrelevant).expect("serializes"),
            "\"irrelevant\""
        );
        let back: Answer = serde_json::from_str("\"close\"").expect("deserializes");
        assert_eq!(back, Answer::Close);
    }

    #[test]
    fn bands_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&GuessBand::RightDirection).expect("serializes"),
            "\"right_direction\""
        );
    }
}
