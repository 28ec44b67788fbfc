//! Lexicon sentiment: ratio of positive to affect-bearing tokens.
//!
//! Tokens match a lexicon word by substring containment, so "unhappy" counts as
//! positive and a single token can count toward both lists. Text with no
//! affect-bearing tokens scores exactly `NEUTRAL_SENTIMENT`.

pub const NEUTRAL_SENTIMENT: f64 = 0.5;

pub const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "grateful",
    "excited",
    "love",
    "amazing",
    "wonderful",
    "great",
    "joy",
    "peaceful",
    "calm",
    "blessed",
    "thankful",
    "proud",
    "accomplished",
    "hopeful",
    "inspired",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "angry",
    "frustrated",
    "anxious",
    "worried",
    "stressed",
    "tired",
    "exhausted",
    "overwhelmed",
    "lonely",
    "scared",
    "disappointed",
    "hurt",
    "confused",
    "lost",
];

#[derive(Debug, Clone)]
pub struct SentimentScorer {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::with_lexicon(POSITIVE_WORDS, NEGATIVE_WORDS)
    }
}

impl SentimentScorer {
    pub fn with_lexicon(positive: &[&str], negative: &[&str]) -> Self {
        Self {
            positive: positive.iter().map(|w| w.to_lowercase()).collect(),
            negative: negative.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Returns a positivity score in [0, 1].
    pub fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut positive = 0u32;
        let mut negative = 0u32;

        for token in lowered.split_whitespace() {
            if self.positive.iter().any(|w| token.contains(w.as_str())) {
                positive += 1;
            }
            if self.negative.iter().any(|w| token.contains(w.as_str())) {
                negative += 1;
            }
        }

        let total = positive + negative;
        if total == 0 {
            return NEUTRAL_SENTIMENT;
        }
        f64::from(positive) / f64::from(total)
    }
}
