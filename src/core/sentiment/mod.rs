//! Keyword-rule sentiment classification for user speech transcripts.
//!
//! The classifier maps a transcript to one of {POSITIVE, NEGATIVE, NEUTRAL}
//! by evaluating a fixed sequence of rules with early exit:
//!
//! 1. Short inputs and bare greetings are NEUTRAL.
//! 2. Strong negative phrases (negated well-being, physical pain, illness).
//! 3. Strong positive phrases.
//! 4. Negation + positive-word bigrams ("not happy", "don't feel good").
//! 5. Positive-keyword vs negative-keyword presence counts.
//!
//! The word lists are a behavioral contract: rule order and list contents
//! determine the label, so changes here change classifications.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sentiment label for a user transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    /// Positive sentiment
    Positive,
    /// Negative sentiment
    Negative,
    /// Neutral or undetermined sentiment
    Neutral,
}

impl Sentiment {
    /// Convert to the wire value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bare greetings and acknowledgments that short-circuit to NEUTRAL.
const GREETINGS: &[&str] = &["hi", "hello", "hey", "yes", "no", "ok", "okay"];

/// Negation tokens, with unapostrophized variants as spoken transcripts
/// often arrive without punctuation.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt",
    "aren't", "arent",
];

/// Positive keywords for bigram negation checks and presence counting.
const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "great",
    "good",
    "better",
    "wonderful",
    "excited",
    "glad",
    "relieved",
    "thankful",
    "grateful",
    "love",
    "excellent",
    "amazing",
    "fantastic",
    "joy",
    "pleased",
    "delighted",
    "blessed",
    "fortunate",
    "perfect",
    "brilliant",
    "awesome",
    "super",
    "proud",
    "hopeful",
];

/// Negative keyword stems for presence counting. Stems match inflected
/// forms as substrings ("irritat" matches "irritated" and "irritable").
const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "bad",
    "worse",
    "awful",
    "terrible",
    "angry",
    "frustrated",
    "anxious",
    "worried",
    "pain",
    "hurt",
    "difficult",
    "hard",
    "struggling",
    "depressed",
    "upset",
    "problem",
    "issue",
    "trouble",
    "concern",
    "stress",
    "overwhelm",
    "exhaust",
    "tire",
    "sick",
    "ill",
    "uncomfortable",
    "scary",
    "fear",
    "afraid",
    "nervous",
    "tense",
    "irritable",
    "annoyed",
    "miserable",
    "hopeless",
    "helpless",
    "lonely",
    "isolated",
    "crying",
    "tears",
    "suffer",
    "ache",
    "sore",
    "insomnia",
    "sleepless",
    "fatigue",
    "weary",
    "drained",
    "nausea",
    "dizzy",
    "headache",
    "migraine",
    "cramp",
    "sweat",
    "hot flash",
    "mood swing",
    "irritat",
    "anger",
    "rage",
    "panic",
    "attack",
    "unable",
    "can't",
    "cannot",
    "won't",
    "fail",
    "loss",
    "lost",
    "gone",
    "missing",
];

/// Multi-word phrases that are NEGATIVE regardless of keyword counts.
/// Checked before positive phrases so negated well-being ("not feeling
/// great") cannot hit a positive keyword first.
const STRONG_NEGATIVE_PHRASES: &[&str] = &[
    "don't feel good",
    "dont feel good",
    "not feeling good",
    "not feeling well",
    "don't feel well",
    "dont feel well",
    "not feel good",
    "not feel well",
    "not feeling great",
    "not feeling my best",
    "not feeling the best",
    "not feeling best",
    "not my best",
    "feel bad",
    "feel awful",
    "feel terrible",
    "feeling bad",
    "feeling awful",
    "bad day",
    "terrible day",
    "awful day",
    "not good",
    "not great",
    "not well",
    "having trouble",
    "having problems",
    "having issues",
    "can't sleep",
    "unable to sleep",
    "sleep problem",
    "sleep issue",
    "waking up",
    "night sweat",
    "weight gain",
    "weight loss",
    "no energy",
    "not happy",
    // physical pain
    "sore back",
    "back pain",
    "back hurts",
    "my back",
    "bad back",
    "hurt my back",
    "sore neck",
    "neck pain",
    "headache",
    "migraine",
    "in pain",
    "feeling pain",
    "hurts",
    "aching",
    "stiff",
    "pulled a muscle",
    "muscle pain",
    // illness
    "have a cold",
    "got a cold",
    "caught a cold",
    "feeling sick",
    "feel sick",
    "under the weather",
    "unwell",
    "flu",
    "fever",
    "cough",
    "runny nose",
    "blocked nose",
    "stuffy",
    "sneezing",
    "sore throat",
];

/// Multi-word phrases that are POSITIVE. Checked after the negative
/// phrases to avoid false positives on negated forms.
const STRONG_POSITIVE_PHRASES: &[&str] = &[
    "feel better",
    "feeling better",
    "feel great",
    "feeling great",
    "feel wonderful",
    "feeling wonderful",
    "feel amazing",
    "feeling amazing",
    "so happy",
    "very happy",
    "really happy",
    "feeling good",
];

/// Classify a transcript. Pure, deterministic, case-insensitive.
pub fn classify(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let trimmed = lowered.trim();

    // Very short messages and bare greetings carry no signal.
    if trimmed.chars().count() < 5 || GREETINGS.contains(&trimmed) {
        return Sentiment::Neutral;
    }

    if STRONG_NEGATIVE_PHRASES.iter().any(|p| lowered.contains(p)) {
        return Sentiment::Negative;
    }

    if STRONG_POSITIVE_PHRASES.iter().any(|p| lowered.contains(p)) {
        return Sentiment::Positive;
    }

    // Negation directly before a positive word flips it ("not happy",
    // "didn't feel great").
    for negation in NEGATIONS {
        for positive in POSITIVE_WORDS {
            if lowered.contains(&format!("{negation} {positive}"))
                || lowered.contains(&format!("{negation} feel {positive}"))
            {
                return Sentiment::Negative;
            }
        }
    }

    // Each keyword counts once, however often it occurs.
    let positive = POSITIVE_WORDS.iter().filter(|w| lowered.contains(**w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lowered.contains(**w)).count();

    match positive.cmp(&negative) {
        Ordering::Greater => Sentiment::Positive,
        Ordering::Less => Sentiment::Negative,
        Ordering::Equal => Sentiment::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_is_neutral() {
        assert_eq!(classify("hi"), Sentiment::Neutral);
        assert_eq!(classify("ok"), Sentiment::Neutral);
        assert_eq!(classify("  no  "), Sentiment::Neutral);
        // Shorter than five characters even though "flu" is a phrase hit.
        assert_eq!(classify("flu"), Sentiment::Neutral);
    }

    #[test]
    fn test_greetings_are_neutral() {
        assert_eq!(classify("hello"), Sentiment::Neutral);
        assert_eq!(classify("OKAY"), Sentiment::Neutral);
    }

    #[test]
    fn test_strong_negative_phrases() {
        assert_eq!(classify("I don't feel good today"), Sentiment::Negative);
        assert_eq!(classify("I'm not feeling great"), Sentiment::Negative);
        assert_eq!(
            classify("my back hurts and I have a headache"),
            Sentiment::Negative
        );
        assert_eq!(classify("I think I caught a cold"), Sentiment::Negative);
        assert_eq!(classify("feeling a bit under the weather"), Sentiment::Negative);
    }

    #[test]
    fn test_negative_phrase_beats_positive_keyword() {
        // "great" and "good" are positive keywords, but the phrases hit first.
        assert_eq!(classify("not feeling great at all"), Sentiment::Negative);
        assert_eq!(classify("things are not good"), Sentiment::Negative);
    }

    #[test]
    fn test_strong_positive_phrases() {
        assert_eq!(classify("I feel great, thank you!"), Sentiment::Positive);
        assert_eq!(classify("I'm feeling better now"), Sentiment::Positive);
        assert_eq!(classify("I'm so happy about it"), Sentiment::Positive);
    }

    #[test]
    fn test_negation_bigram() {
        assert_eq!(classify("not happy about this"), Sentiment::Negative);
        assert_eq!(classify("dont feel proud of myself"), Sentiment::Negative);
        assert_eq!(classify("I am never excited anymore"), Sentiment::Negative);
    }

    #[test]
    fn test_keyword_counts() {
        assert_eq!(classify("what a wonderful, brilliant day"), Sentiment::Positive);
        assert_eq!(classify("I am anxious and worried"), Sentiment::Negative);
        // "happy" vs "worried" tie resolves to neutral.
        assert_eq!(classify("happy but worried"), Sentiment::Neutral);
    }

    #[test]
    fn test_negative_stem_matching() {
        assert_eq!(classify("everyone was irritated with me"), Sentiment::Negative);
        assert_eq!(classify("she has been irritable all week"), Sentiment::Negative);
    }

    #[test]
    fn test_no_signal_is_neutral() {
        assert_eq!(classify("the meeting is at three"), Sentiment::Neutral);
    }

    #[test]
    fn test_case_insensitive_and_deterministic() {
        assert_eq!(classify("I FEEL GREAT"), Sentiment::Positive);
        for _ in 0..3 {
            assert_eq!(classify("I don't feel good"), Sentiment::Negative);
        }
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(Sentiment::Positive.as_str(), "POSITIVE");
        assert_eq!(Sentiment::Negative.to_string(), "NEGATIVE");
        assert_eq!(
            serde_json::to_string(&Sentiment::Neutral).unwrap(),
            "\"NEUTRAL\""
        );
    }
}
