// Insights engine: sentiment scoring, theme extraction, streaks, windowed
// aggregation and the weekly recap. Everything except `companion` is pure and
// synchronous; `now` is always passed in.

pub mod companion;
pub mod handlers;
pub mod insights;
pub mod patterns;
pub mod prompts;
pub mod sentiment;
pub mod streak;
pub mod summary;
pub mod themes;

use std::collections::BTreeSet;

use crate::analysis::sentiment::SentimentScorer;
use crate::analysis::themes::ThemeExtractor;
use crate::models::Theme;

/// Scores computed once when an entry is created.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnalysis {
    pub sentiment: f64,
    pub themes: BTreeSet<Theme>,
}

/// Bundles the two text classifiers applied to every new entry.
#[derive(Debug, Clone, Default)]
pub struct EntryAnalyzer {
    pub sentiment: SentimentScorer,
    pub themes: ThemeExtractor,
}

impl EntryAnalyzer {
    pub fn analyze(&self, text: &str) -> TextAnalysis {
        TextAnalysis {
            sentiment: self.sentiment.score(text),
            themes: self.themes.extract(text),
        }
    }
}
