//! crates/feedback_core/src/scoring.rs
//!
//! The deterministic weighted-keyword sentiment scorer. This is the fallback
//! used whenever the remote classifier is unavailable, times out, or returns
//! something other than the three accepted labels. It always produces a
//! label, which is what makes the classifier as a whole infallible.
//!
//! The scoring must stay bit-for-bit reproducible: it doubles as the offline
//! oracle in tests.

use crate::domain::Sentiment;

/// Words that read as praise, weighted by strength.
const POSITIVE_WEIGHTS: &[(&str, f32)] = &[
    ("excellent", 2.0),
    ("amazing", 2.0),
    ("delicious", 2.0),
    ("perfect", 2.0),
    ("great", 1.5),
    ("good", 1.5),
    ("love", 1.5),
    ("enjoyed", 1.5),
    ("outstanding", 1.5),
    ("brilliant", 1.5),
    ("impressed", 1.5),
    ("delightful", 1.5),
    ("fresh", 1.0),
    ("tasty", 1.0),
    ("friendly", 1.0),
    ("quick", 1.0),
    ("recommend", 1.0),
    ("clean", 1.0),
    ("authentic", 1.0),
    ("favorite", 1.0),
    ("satisfied", 1.0),
    ("pleased", 1.0),
    ("memorable", 1.0),
];

/// Words that read as complaints. The tail entries (`wish`, `could`,
/// `should`, `better`, `more`, `less`, `patient`, `attentive`, `faster`,
/// `quicker`) catch mild, suggestion-shaped complaints like "I wish the
/// server was more patient".
const NEGATIVE_WEIGHTS: &[(&str, f32)] = &[
    ("terrible", 2.0),
    ("awful", 2.0),
    ("horrible", 2.0),
    ("worst", 2.0),
    ("disgusting", 2.0),
    ("inedible", 2.0),
    ("disappointed", 1.5),
    ("bad", 1.5),
    ("poor", 1.5),
    ("unpleasant", 1.5),
    ("unacceptable", 1.5),
    ("slow", 1.0),
    ("cold", 1.0),
    ("undercooked", 1.0),
    ("overcooked", 1.0),
    ("salty", 1.0),
    ("bland", 1.0),
    ("rude", 1.0),
    ("dirty", 1.0),
    ("expensive", 1.0),
    ("wait", 1.0),
    ("wrong", 1.0),
    ("missing", 1.0),
    ("late", 1.0),
    ("mess", 1.0),
    ("dry", 1.0),
    ("tough", 1.0),
    ("tasteless", 1.0),
    ("mediocre", 1.0),
    ("waste", 1.0),
    ("complaint", 1.0),
    ("issue", 1.0),
    ("problem", 1.0),
    ("wish", 1.0),
    ("could", 1.0),
    ("should", 1.0),
    ("better", 1.0),
    ("more", 1.0),
    ("less", 1.0),
    ("patient", 1.0),
    ("attentive", 1.0),
    ("faster", 1.0),
    ("quicker", 1.0),
];

/// Words that mark feedback as merely observational.
const NEUTRAL_WEIGHTS: &[(&str, f32)] = &[
    ("okay", 0.5),
    ("fine", 0.5),
    ("average", 0.5),
    ("normal", 0.5),
    ("regular", 0.5),
    ("standard", 0.5),
    ("typical", 0.5),
    ("decent", 0.5),
    ("acceptable", 0.5),
    ("satisfactory", 0.5),
    ("moderate", 0.5),
    ("reasonable", 0.5),
    ("fair", 0.5),
    ("alright", 0.5),
    ("so-so", 0.5),
    ("middle", 0.5),
    ("neutral", 0.5),
    ("balanced", 0.5),
    ("mixed", 0.5),
];

/// Negation cues. A cue inverts the *next* token only.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "wasn't", "weren't", "isn't", "aren't", "hadn't",
    "doesn't", "couldn't", "wouldn't", "shouldn't",
];

/// Negating praise is stronger than the praise itself ("not good" complains
/// harder than "good" compliments).
const NEGATED_POSITIVE_AMPLIFIER: f32 = 1.2;
/// Negating a complaint is weaker than the complaint ("not bad" is faint
/// praise).
const NEGATED_NEGATIVE_DAMPENER: f32 = 0.8;

/// Bonus for "wish" / "could be" / "should be" phrasing: text-buried mild
/// complaints that token-level scoring under-weights.
const PHRASE_BONUS: f32 = 1.0;

fn weight_in(table: &[(&str, f32)], word: &str) -> Option<f32> {
    table.iter().find(|(w, _)| *w == word).map(|(_, weight)| *weight)
}

/// Scores free-text feedback into a sentiment label.
///
/// Lowercases, splits on whitespace, and scans left to right. A negation cue
/// followed by another token consults only that next token (inverted, per the
/// amplifier/dampener constants) and the scan then skips past both, so the
/// negated token is never re-scored. After the scan, phrase bonuses for
/// "wish" and "could be"/"should be" are applied to the negative score.
///
/// The strictly highest score wins. An exact two-way tie above the third
/// score resolves Positive over Negative over Neutral; all-zero scores are
/// Neutral.
pub fn score_sentiment(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let mut pos_score = 0.0f32;
    let mut neg_score = 0.0f32;
    let mut neu_score = 0.0f32;

    let mut i = 0;
    while i < words.len() {
        let word = words[i];

        if NEGATIONS.contains(&word) && i + 1 < words.len() {
            let next = words[i + 1];
            if let Some(weight) = weight_in(POSITIVE_WEIGHTS, next) {
                neg_score += weight * NEGATED_POSITIVE_AMPLIFIER;
            } else if let Some(weight) = weight_in(NEGATIVE_WEIGHTS, next) {
                pos_score += weight * NEGATED_NEGATIVE_DAMPENER;
            }
            // The negated token is consumed either way.
            i += 2;
            continue;
        }

        if let Some(weight) = weight_in(POSITIVE_WEIGHTS, word) {
            pos_score += weight;
        } else if let Some(weight) = weight_in(NEGATIVE_WEIGHTS, word) {
            neg_score += weight;
        } else if let Some(weight) = weight_in(NEUTRAL_WEIGHTS, word) {
            neu_score += weight;
        }

        i += 1;
    }

    if lowered.contains("wish") {
        neg_score += PHRASE_BONUS;
    }
    if lowered.contains("could be") || lowered.contains("should be") {
        neg_score += PHRASE_BONUS;
    }

    if pos_score == 0.0 && neg_score == 0.0 && neu_score == 0.0 {
        return Sentiment::Neutral;
    }

    if pos_score > neg_score && pos_score > neu_score {
        Sentiment::Positive
    } else if neg_score > pos_score && neg_score > neu_score {
        Sentiment::Negative
    } else if neu_score > pos_score && neu_score > neg_score {
        Sentiment::Neutral
    } else if pos_score >= neg_score && pos_score >= neu_score {
        // Two-way tie above the third score.
        Sentiment::Positive
    } else if neg_score >= pos_score && neg_score >= neu_score {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_praise_is_positive() {
        assert_eq!(
            score_sentiment("Food was delicious and service was great"),
            Sentiment::Positive
        );
    }

    #[test]
    fn observational_feedback_is_neutral() {
        assert_eq!(score_sentiment("The food was okay"), Sentiment::Neutral);
    }

    #[test]
    fn wish_phrasing_is_negative() {
        // "wish", "more" and "patient" each score negative, and the "wish"
        // substring bonus lands on top.
        assert_eq!(
            score_sentiment("I wish the server was more patient"),
            Sentiment::Negative
        );
    }

    #[test]
    fn negation_inverts_praise() {
        assert_eq!(score_sentiment("not good"), Sentiment::Negative);
    }

    #[test]
    fn negation_dampens_complaints() {
        // "not bad" adds 1.5 * 0.8 to the positive score and nothing else.
        assert_eq!(score_sentiment("not bad"), Sentiment::Positive);
    }

    #[test]
    fn negated_token_is_not_rescored() {
        // "never" consumes "delicious"; without the skip the positive table
        // would also see it and flip the result.
        assert_eq!(score_sentiment("never delicious"), Sentiment::Negative);
    }

    #[test]
    fn trailing_negation_scores_nothing() {
        // A negation cue with no following token falls through to plain
        // scanning, where "not" matches no table.
        assert_eq!(score_sentiment("not"), Sentiment::Neutral);
    }

    #[test]
    fn complaint_keywords_dominate() {
        assert_eq!(
            score_sentiment("Terrible service, cold food"),
            Sentiment::Negative
        );
    }

    #[test]
    fn could_be_phrasing_is_negative() {
        // "could" (1.0) + "better" (1.0) + phrase bonus (1.0).
        assert_eq!(score_sentiment("could be better"), Sentiment::Negative);
    }

    #[test]
    fn unscored_text_defaults_to_neutral() {
        assert_eq!(score_sentiment(""), Sentiment::Neutral);
        assert_eq!(
            score_sentiment("we came here on a tuesday"),
            Sentiment::Neutral
        );
    }

    #[test]
    fn exact_tie_prefers_positive_then_negative() {
        // "good" (1.5) vs "bad" (1.5): tied above neutral, Positive wins.
        assert_eq!(score_sentiment("good bad"), Sentiment::Positive);
        // "slow" (1.0) vs "okay" (0.5) + "fine" (0.5): tied above positive,
        // Negative wins.
        assert_eq!(score_sentiment("slow okay fine"), Sentiment::Negative);
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "The pasta was amazing but the wait was terrible";
        let first = score_sentiment(text);
        for _ in 0..10 {
            assert_eq!(score_sentiment(text), first);
        }
    }

    #[test]
    fn always_yields_a_label() {
        // A smoke sweep over awkward inputs: whatever comes in, one of the
        // three labels comes out.
        let inputs = [
            "!!!",
            "NOT",
            "never",
            "wish",
            "could be",
            "ñoño 屋台 🍜",
            "not not not good",
            "no no no",
        ];
        for input in inputs {
            let label = score_sentiment(input);
            assert!(matches!(
                label,
                Sentiment::Positive | Sentiment::Neutral | Sentiment::Negative
            ));
        }
    }
}
