//! Text normalization and similarity primitives.
//!
//! Tokenization: case-fold, split on everything that
//! is not alphanumeric (this covers both ASCII and CJK punctuation), drop
//! single-character tokens and stop-words. For CJK text without spaces this
//! yields clause-level tokens, which is why callers lean on concept matching
//! rather than raw token overlap.

use std::collections::HashSet;

/// Words carrying no signal for overlap scoring.
const STOP_WORDS: &[&str] = &[
    // Chinese particles and interrogatives
    "的", "了", "在", "是", "有", "和", "与", "或", "但", "然后", "为什么", "什么", "怎么",
    "哪里", "谁", "一个", "一家", "他们", "自己",
    // English function words, for mixed-language questions
    "the", "a", "an", "is", "of", "to", "and", "was", "did", "does", "do",
];

/// Tokenize into a normalized set of salient terms.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() > 1 && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Overlap ratio |a ∩ b| / max(|a|, |b|). Zero when either set is empty.
pub fn overlap_ratio(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / a.len().max(b.len()) as f64
}

/// Jaccard similarity |a ∩ b| / |a ∪ b|. Zero when either set is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Whole-text word overlap: Jaccard over the significant characters of both
/// texts. For CJK a character approximates a word, so this catches near-miss
/// phrasings that clause-level tokens cannot.
pub fn char_jaccard(a: &str, b: &str) -> f64 {
    let chars = |text: &str| -> HashSet<char> {
        text.to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect()
    };
    let a = chars(a);
    let b = chars(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_stop_words_and_short_tokens() {
        let tokens = tokenize("他 在 餐厅 点了 一碗 海龟汤");
        assert!(tokens.contains("餐厅"));
        assert!(tokens.contains("海龟汤"));
        assert!(!tokens.contains("在"));
        assert!(!tokens.contains("他"));
    }

    #[test]
    fn splits_on_cjk_punctuation() {
        let tokens = tokenize("他尝了一口，然后自杀了。为什么？");
        assert!(tokens.contains("他尝了一口"));
        assert!(!tokens.contains("为什么"));
    }

    #[test]
    fn tokenize_is_case_folded() {
        let tokens = tokenize("The MAN ordered Soup");
        assert!(tokens.contains("man"));
        assert!(tokens.contains("soup"));
        assert!(!tokens.contains("the"));
    }

    #[test]
    fn empty_inputs_score_zero() {
        let empty = HashSet::new();
        let some = tokenize("海龟汤");
        assert_eq!(overlap_ratio(&empty, &some), 0.0);
        assert_eq!(jaccard(&empty, &some), 0.0);
        assert_eq!(char_jaccard("", "海龟汤"), 0.0);
    }

    #[test]
    fn identical_texts_score_one() {
        let tokens = tokenize("妻子点的不是鱼，而是河豚。");
        assert_eq!(jaccard(&tokens, &tokens), 1.0);
        assert_eq!(char_jaccard("河豚有毒", "河豚有毒"), 1.0);
    }

    #[test]
    fn char_overlap_catches_rephrasings() {
        let score = char_jaccard("丈夫中毒死了", "丈夫尝了一口就中毒身亡了");
        assert!(score > 0.3, "expected meaningful overlap, got {score}");
    }
}
