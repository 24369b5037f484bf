//! Deterministic local narrator.
//!
//! Three engines over the same text primitives: the relevance classifier
//! (question -> yes/no/close/irrelevant), the guess evaluator (free-text
//! guess -> graded band), and the hint generator (archetype pools plus
//! clue-count tiers). All three are pure over their inputs except the
//! zero-clue hint pick, which draws through the injected `RandomPort`.

use std::sync::Arc;

use async_trait::async_trait;

use turtlesoup_domain::{Answer, Archetype, GuessBand, Story};

use super::concepts::{concepts_in, QuestionFocus};
use super::text;
use crate::infrastructure::ports::{
    GuessVerdict, NarratorError, NarratorPort, QuestionVerdict, RandomPort,
};

// =============================================================================
// Relevance classifier
// =============================================================================

// Weighted sum over three signals. Concept evidence dominates: clause-level
// CJK tokens rarely intersect, so raw keyword overlap is a weak signal here.
const KEYWORD_WEIGHT: f64 = 0.2;
const CONCEPT_WEIGHT: f64 = 0.5;
const FOCUS_WEIGHT: f64 = 0.3;

// Every matched concept beyond the first strengthens the verdict, capped at
// a perfect score.
const CONCEPT_BREADTH_BONUS: f64 = 0.15;

// Monotonic classification thresholds, checked high to low: yes, close,
// irrelevant, and everything below reads as a plain no.
const YES_THRESHOLD: f64 = 0.8;
const CLOSE_THRESHOLD: f64 = 0.55;
const IRRELEVANT_THRESHOLD: f64 = 0.3;

/// Guidance returned when the question is not shaped as yes/no.
pub const REPHRASE_GUIDANCE: &str = "请用是非问句提问，比如以「吗」结尾。";

/// Check that a question is phrased so it can be answered with yes or no.
///
/// Permissive: trailing particles, common A-not-A infixes, and English
/// auxiliary-verb leads all pass.
pub fn is_yes_no_question(question: &str) -> bool {
    let trimmed = question
        .trim()
        .trim_end_matches(['？', '?', '。', '！', '!', ' ']);
    if trimmed.is_empty() {
        return false;
    }

    const TAIL_PARTICLES: &[&str] = &["吗", "么", "吧", "没有"];
    const INFIX_PATTERNS: &[&str] = &[
        "是不是", "是否", "有没有", "对不对", "会不会", "能不能", "可不可以", "对吗",
    ];
    const ENGLISH_LEADS: &[&str] = &[
        "is ", "are ", "was ", "were ", "does ", "do ", "did ", "has ", "have ", "can ", "could ",
        "will ",
    ];

    let lower = trimmed.to_lowercase();
    TAIL_PARTICLES.iter().any(|p| trimmed.ends_with(p))
        || INFIX_PATTERNS.iter().any(|p| trimmed.contains(p))
        || ENGLISH_LEADS.iter().any(|p| lower.starts_with(p))
}

/// Relevance score of a question against the story text, in [0, 1].
/// Empty inputs score 0.
pub fn relevance_score(question: &str, story_text: &str) -> f64 {
    let story_tokens = text::tokenize(story_text);
    let question_tokens = text::tokenize(question);
    if story_tokens.is_empty() || question_tokens.is_empty() {
        return 0.0;
    }

    let keyword = text::overlap_ratio(&question_tokens, &story_tokens);

    let mentioned = concepts_in(question);
    let exhibited = concepts_in(story_text);
    let matched = mentioned.intersection(&exhibited).count();
    let concept = if mentioned.is_empty() {
        0.0
    } else {
        matched as f64 / mentioned.len() as f64
    };

    let focus = QuestionFocus::classify(question);
    let focus_score = match focus {
        QuestionFocus::General => 0.5,
        _ if focus.story_cues().iter().any(|cue| story_text.contains(cue)) => 1.0,
        _ => 0.25,
    };

    let base = KEYWORD_WEIGHT * keyword + CONCEPT_WEIGHT * concept + FOCUS_WEIGHT * focus_score;
    let breadth = CONCEPT_BREADTH_BONUS * matched.saturating_sub(1) as f64;
    (base + breadth).min(1.0)
}

/// Map a relevance score onto an answer bucket. Exhaustive: every score
/// lands in exactly one bucket.
pub fn answer_for_score(score: f64) -> Answer {
    if score >= YES_THRESHOLD {
        Answer::Yes
    } else if score >= CLOSE_THRESHOLD {
        Answer::Close
    } else if score >= IRRELEVANT_THRESHOLD {
        Answer::Irrelevant
    } else {
        Answer::No
    }
}

fn explanation_for(answer: Answer) -> &'static str {
    match answer {
        Answer::Yes => "是的，这个方向与真相相符。",
        Answer::Close => "你已经接近了，再往深处想想。",
        Answer::Irrelevant => "这个问题与故事的关键关系不大。",
        Answer::No => "不是，换个角度试试。",
    }
}

/// Classify a question against a story. Never fails; malformed questions
/// surface as `Irrelevant` with rephrase guidance.
pub fn classify_question(question: &str, story: &Story) -> QuestionVerdict {
    if !is_yes_no_question(question) {
        return QuestionVerdict::new(Answer::Irrelevant, REPHRASE_GUIDANCE);
    }
    // Questions probe the hidden truth, so both the surface and the
    // solution count as story evidence.
    let story_text = format!("{} {}", story.prompt, story.solution);
    let answer = answer_for_score(relevance_score(question, &story_text));
    QuestionVerdict::new(answer, explanation_for(answer))
}

// =============================================================================
// Guess evaluator
// =============================================================================

// Fixed weights over token-set, whole-text, and concept-set similarity.
const GUESS_KEYWORD_WEIGHT: f64 = 0.4;
const GUESS_TEXT_WEIGHT: f64 = 0.4;
const GUESS_CONCEPT_WEIGHT: f64 = 0.2;

// Non-overlapping bands, evaluated high to low.
const CORRECT_BAND: f64 = 0.75;
const CLOSE_BAND: f64 = 0.5;
const DIRECTION_BAND: f64 = 0.3;

/// Similarity of a guess to the target text, in [0, 1].
pub fn guess_score(guess: &str, target: &str) -> f64 {
    let guess_tokens = text::tokenize(guess);
    let target_tokens = text::tokenize(target);
    let keyword = text::jaccard(&guess_tokens, &target_tokens);
    let whole_text = text::char_jaccard(guess, target);

    let guess_concepts = concepts_in(guess);
    let target_concepts = concepts_in(target);
    let union = guess_concepts.union(&target_concepts).count();
    let concept = if union == 0 {
        0.0
    } else {
        guess_concepts.intersection(&target_concepts).count() as f64 / union as f64
    };

    GUESS_KEYWORD_WEIGHT * keyword + GUESS_TEXT_WEIGHT * whole_text + GUESS_CONCEPT_WEIGHT * concept
}

/// Map a similarity score onto a guess band.
pub fn band_for_score(score: f64) -> GuessBand {
    if score > CORRECT_BAND {
        GuessBand::Correct
    } else if score > CLOSE_BAND {
        GuessBand::Close
    } else if score > DIRECTION_BAND {
        GuessBand::RightDirection
    } else {
        GuessBand::Incorrect
    }
}

/// Grade a guess against the story. The guess is scored against the
/// solution text (that is what players are guessing); stories without a
/// curated solution fall back to the prompt. Deterministic and idempotent.
pub fn evaluate_guess(guess: &str, story: &Story) -> GuessVerdict {
    let target = if story.solution.trim().is_empty() {
        story.prompt.as_str()
    } else {
        story.solution.as_str()
    };
    let band = band_for_score(guess_score(guess, target));
    GuessVerdict {
        band,
        message: band.message_zh().to_string(),
        full_story: band.is_correct().then(|| story.reveal().to_string()),
    }
}

// =============================================================================
// Hint generator
// =============================================================================

/// Generic hints, applicable to any story.
const GENERIC_HINTS: &[&str] = &[
    "注意故事中的时间顺序",
    "关注人物的身份和关系",
    "思考人物的动机",
    "注意环境因素",
    "考虑故事的背景",
    "关注细节描述",
    "思考因果关系",
    "注意人物的行为模式",
];

// Clue-count tiers: the more clues found, the more pointed the hint.
const TIER_MANY_CLUES: &str = "你已经发现了不少线索，尝试将它们联系起来，还原整个故事。";
const TIER_TWO_CLUES: &str = "把已有的线索联系起来，注意它们之间可能存在的转折点。";
const TIER_ONE_CLUE: &str = "围绕已发现的线索继续追问细节，矛盾之处往往就是突破口。";

fn archetype_hints(archetype: Archetype) -> &'static [&'static str] {
    match archetype {
        Archetype::Cannibalism => &[
            "注意主人公过去的经历",
            "想想他为什么对味道如此敏感",
            "海上曾经发生过什么？",
        ],
        Archetype::Sacrifice => &[
            "有人为了别人付出了代价",
            "注意水的来源",
            "两个人的关系很重要",
        ],
        Archetype::Physical => &[
            "注意人物的身体特征",
            "想想他为什么不按更高的按钮",
            "身高可能是关键",
        ],
        Archetype::Poison => &[
            "食物里可能有问题",
            "注意菜的种类",
            "为什么尝一口就致命？",
        ],
        Archetype::Medical => &[
            "这可能与身体状况有关",
            "枪不一定是用来伤人的",
            "惊吓有什么用处？",
        ],
        Archetype::Survival => &[
            "注意环境的恶劣",
            "想想人在绝境中会做什么",
            "谁先遇到了危险？",
        ],
        Archetype::General => &[],
    }
}

/// Pick a hint for the story given the clue titles found so far.
///
/// With no clues the pick is uniform over the archetype pool plus the
/// generic pool; once clues exist the hint is keyed by clue-count tier and
/// escalates monotonically with progress.
pub fn pick_hint(story: &Story, discovered_clues: &[String], random: &dyn RandomPort) -> String {
    match discovered_clues.len() {
        0 => {
            let pool: Vec<&str> = archetype_hints(story.archetype)
                .iter()
                .chain(GENERIC_HINTS.iter())
                .copied()
                .collect();
            let index = random.gen_range(0, pool.len() as i32 - 1).max(0) as usize;
            pool.get(index)
                .copied()
                .unwrap_or("注意故事中的时间顺序")
                .to_string()
        }
        n if n >= 3 => TIER_MANY_CLUES.to_string(),
        2 => TIER_TWO_CLUES.to_string(),
        _ => TIER_ONE_CLUE.to_string(),
    }
}

// =============================================================================
// Port implementation
// =============================================================================

/// The deterministic local narrator. Infallible by construction; the
/// `Result` in the port signature exists for the remote delegate.
pub struct HeuristicNarrator {
    random: Arc<dyn RandomPort>,
}

impl HeuristicNarrator {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }
}

#[async_trait]
impl NarratorPort for HeuristicNarrator {
    async fn answer_question(
        &self,
        question: &str,
        story: &Story,
    ) -> Result<QuestionVerdict, NarratorError> {
        Ok(classify_question(question, story))
    }

    async fn evaluate_guess(
        &self,
        guess: &str,
        story: &Story,
    ) -> Result<GuessVerdict, NarratorError> {
        Ok(evaluate_guess(guess, story))
    }

    async fn generate_hint(
        &self,
        story: &Story,
        discovered_clues: &[String],
    ) -> Result<String, NarratorError> {
        Ok(pick_hint(story, discovered_clues, self.random.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;

    fn turtle_soup_story() -> Story {
        Story::new(
            "一个男人走进一家餐厅，点了一碗海龟汤。他尝了一口，然后自杀了。为什么？",
            "这个男人曾经在海上遇难，在极度饥饿的情况下，他不得不吃同伴的尸体来生存。\
             当他尝到海龟汤的味道时，想起了当时吃人肉的味道，因此选择了自杀。",
            Archetype::Cannibalism,
        )
    }

    // ------------------------------------------------------------------
    // Question validation
    // ------------------------------------------------------------------

    #[test]
    fn accepts_common_yes_no_shapes() {
        assert!(is_yes_no_question("他死了吗？"));
        assert!(is_yes_no_question("他是不是自杀的"));
        assert!(is_yes_no_question("故事里有没有别人？"));
        assert!(is_yes_no_question("Is the man dead?"));
    }

    #[test]
    fn rejects_open_questions() {
        assert!(!is_yes_no_question("他为什么要自杀"));
        assert!(!is_yes_no_question(""));
        assert!(!is_yes_no_question("？？？"));
    }

    #[test]
    fn malformed_question_surfaces_as_irrelevant_with_guidance() {
        let verdict = classify_question("讲讲这个故事", &turtle_soup_story());
        assert_eq!(verdict.answer, Answer::Irrelevant);
        assert_eq!(verdict.explanation.as_deref(), Some(REPHRASE_GUIDANCE));
    }

    // ------------------------------------------------------------------
    // Classifier
    // ------------------------------------------------------------------

    #[test]
    fn death_question_against_death_story_is_never_no() {
        let story = turtle_soup_story();
        for question in ["男人死了吗？", "他是不是自杀了？", "Is the man dead?"] {
            let verdict = classify_question(question, &story);
            assert!(
                matches!(verdict.answer, Answer::Yes | Answer::Close),
                "{question} classified as {:?}",
                verdict.answer
            );
        }
    }

    #[test]
    fn unrelated_question_scores_low() {
        let verdict = classify_question("故事里有飞机吗？", &turtle_soup_story());
        assert!(matches!(verdict.answer, Answer::No | Answer::Irrelevant));
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(relevance_score("", "有故事"), 0.0);
        assert_eq!(relevance_score("他死了吗", ""), 0.0);
    }

    #[test]
    fn score_bands_are_monotonic_and_exhaustive() {
        let samples = [0.0, 0.29, 0.3, 0.54, 0.55, 0.79, 0.8, 1.0];
        let expected = [
            Answer::No,
            Answer::No,
            Answer::Irrelevant,
            Answer::Irrelevant,
            Answer::Close,
            Answer::Close,
            Answer::Yes,
            Answer::Yes,
        ];
        for (score, answer) in samples.iter().zip(expected) {
            assert_eq!(answer_for_score(*score), answer, "score {score}");
        }
    }

    #[test]
    fn multiple_matched_concepts_strengthen_the_verdict() {
        let story = turtle_soup_story();
        let one = relevance_score("他死了吗", &format!("{} {}", story.prompt, story.solution));
        let two = relevance_score(
            "他是不是因为吃过人肉才自杀的",
            &format!("{} {}", story.prompt, story.solution),
        );
        assert!(two > one, "breadth bonus missing: {two} <= {one}");
    }

    // ------------------------------------------------------------------
    // Guess evaluator
    // ------------------------------------------------------------------

    #[test]
    fn canonical_solution_guess_is_correct_with_reveal() {
        let story = turtle_soup_story();
        let verdict = evaluate_guess(&story.solution.clone(), &story);
        assert!(verdict.is_correct());
        let reveal = verdict.full_story.expect("correct guess reveals the solution");
        assert!(!reveal.is_empty());
        assert_eq!(reveal, story.solution);
    }

    #[test]
    fn unrelated_guess_is_incorrect_without_reveal() {
        let verdict = evaluate_guess("他只是单纯不喜欢这家店的味道", &turtle_soup_story());
        assert!(!verdict.is_correct());
        assert!(verdict.full_story.is_none());
    }

    #[test]
    fn evaluator_is_idempotent() {
        let story = turtle_soup_story();
        let guess = "他曾经吃过人肉，喝汤时想起来了，所以自杀。";
        let first = evaluate_guess(guess, &story);
        let second = evaluate_guess(guess, &story);
        assert_eq!(first.band, second.band);
        assert_eq!(first.is_correct(), second.is_correct());
        assert_eq!(first.message, second.message);
    }

    #[test]
    fn guess_bands_are_non_overlapping() {
        assert_eq!(band_for_score(1.0), GuessBand::Correct);
        assert_eq!(band_for_score(0.75), GuessBand::Close);
        assert_eq!(band_for_score(0.5), GuessBand::RightDirection);
        assert_eq!(band_for_score(0.3), GuessBand::Incorrect);
        assert_eq!(band_for_score(0.0), GuessBand::Incorrect);
    }

    #[test]
    fn story_without_solution_reveals_fallback() {
        let story = Story::custom("一个没有汤底的自定义故事。他死了吗？", "");
        let verdict = evaluate_guess("一个没有汤底的自定义故事。他死了吗？", &story);
        assert!(verdict.is_correct());
        assert_eq!(
            verdict.full_story.as_deref(),
            Some(turtlesoup_domain::FALLBACK_SOLUTION)
        );
    }

    // ------------------------------------------------------------------
    // Hint generator
    // ------------------------------------------------------------------

    #[test]
    fn zero_clues_draws_from_archetype_and_generic_pools() {
        let story = turtle_soup_story();
        let first = pick_hint(&story, &[], &FixedRandom(0));
        assert_eq!(first, "注意主人公过去的经历");

        // Past the archetype pool the pick lands in the generic hints.
        let deep = pick_hint(&story, &[], &FixedRandom(5));
        assert!(GENERIC_HINTS.contains(&deep.as_str()));
    }

    #[test]
    fn hints_escalate_with_clue_count() {
        let story = turtle_soup_story();
        let one = vec!["线索一".to_string()];
        let two = vec!["线索一".to_string(), "线索二".to_string()];
        let many = vec![
            "线索一".to_string(),
            "线索二".to_string(),
            "线索三".to_string(),
        ];
        assert_eq!(pick_hint(&story, &one, &FixedRandom(0)), TIER_ONE_CLUE);
        assert_eq!(pick_hint(&story, &two, &FixedRandom(0)), TIER_TWO_CLUES);
        assert_eq!(pick_hint(&story, &many, &FixedRandom(0)), TIER_MANY_CLUES);
        // The tier pick ignores randomness entirely.
        assert_eq!(pick_hint(&story, &many, &FixedRandom(7)), TIER_MANY_CLUES);
    }
}
