//! Companion reflections: remote enrichment layered over the local insights.
//!
//! Each reflection has a local text (templated summary or a canned insight) and
//! an optional remote one. The remote text wins only when it succeeded.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::analysis::insights::InsightsSnapshot;
use crate::analysis::prompts::{
    PERSONAL_INSIGHT_GUIDELINES, PERSONAL_INSIGHT_MAX_TOKENS, PERSONAL_INSIGHT_TEMPLATE,
    WEEKLY_REFLECTION_GUIDELINES, WEEKLY_REFLECTION_MAX_TOKENS, WEEKLY_REFLECTION_TEMPLATE,
};
use crate::analysis::summary::compose_weekly_summary;
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::{request_completion, Completion, CompletionRequest, RemoteOutcome};
use crate::models::{newest_first, Entry};

pub const MIN_ENTRIES_FOR_REFLECTION: usize = 2;
const REFLECTION_ENTRY_LIMIT: usize = 7;
const EXCERPT_CHARS: usize = 150;
const RECENT_MOOD_LIMIT: usize = 5;

pub const LOCAL_INSIGHTS: &[&str] = &[
    "Each entry you write is a step toward deeper self-understanding. Look for patterns in when you feel most at peace.",
    "Your journal captures your evolving relationship with yourself. What themes have surprised you?",
    "Consistency in reflection builds self-awareness. Notice how your writing practice is affecting your daily mindset.",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reflection {
    /// What to display: the remote text when it succeeded, else the local one.
    pub text: String,
    pub local: String,
    pub remote: RemoteOutcome,
}

impl Reflection {
    fn resolve(local: String, remote: RemoteOutcome) -> Self {
        let text = remote.text().map(str::to_string).unwrap_or_else(|| local.clone());
        Self {
            text,
            local,
            remote,
        }
    }
}

pub fn local_insight<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    LOCAL_INSIGHTS.choose(rng).copied().unwrap_or(LOCAL_INSIGHTS[0])
}

/// `None` when there are too few entries to reflect on.
pub fn weekly_reflection_request(entries: &[Entry]) -> Option<CompletionRequest> {
    if entries.len() < MIN_ENTRIES_FOR_REFLECTION {
        return None;
    }

    let excerpts = newest_first(entries)
        .into_iter()
        .take(REFLECTION_ENTRY_LIMIT)
        .map(|e| format!("[Mood: {}] {}...", e.mood.label(), excerpt(&e.content)))
        .collect::<Vec<_>>()
        .join("\n\n");

    Some(CompletionRequest::user(
        &system_prompt(WEEKLY_REFLECTION_GUIDELINES),
        WEEKLY_REFLECTION_TEMPLATE.replace("{entries}", &excerpts),
        WEEKLY_REFLECTION_MAX_TOKENS,
    ))
}

pub fn personal_insight_request(
    entries: &[Entry],
    insights: Option<&InsightsSnapshot>,
) -> Option<CompletionRequest> {
    if entries.len() < MIN_ENTRIES_FOR_REFLECTION {
        return None;
    }

    let mut patterns = String::new();
    let themes = insights
        .map(|i| {
            i.top_themes
                .iter()
                .map(|t| t.theme.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "various topics".to_string());
    _ = writeln!(patterns, "- Top themes: {themes}");
    if let Some(insights) = insights {
        _ = writeln!(patterns, "- Average mood: {:.1}/5", insights.avg_mood);
        _ = writeln!(patterns, "- Sentiment: {}% positive", insights.avg_sentiment);
        _ = writeln!(patterns, "- Current streak: {} days", insights.streak);
    }
    let recent_moods = newest_first(entries)
        .into_iter()
        .take(RECENT_MOOD_LIMIT)
        .map(|e| e.mood.label())
        .collect::<Vec<_>>()
        .join(", ");
    _ = writeln!(patterns, "- Recent moods: {recent_moods}");
    _ = write!(patterns, "- Total entries: {}", entries.len());

    Some(CompletionRequest::user(
        &system_prompt(PERSONAL_INSIGHT_GUIDELINES),
        PERSONAL_INSIGHT_TEMPLATE.replace("{patterns}", &patterns),
        PERSONAL_INSIGHT_MAX_TOKENS,
    ))
}

/// Templated weekly summary, replaced by a remote reflection when one succeeds.
pub async fn weekly_reflection(
    service: Option<&dyn Completion>,
    entries: &[Entry],
    now: DateTime<FixedOffset>,
) -> Reflection {
    let local = compose_weekly_summary(entries, now);
    let remote = match weekly_reflection_request(entries) {
        Some(request) => request_completion(service, &request, "weekly reflection").await,
        None => RemoteOutcome::Failed("not enough entries".to_string()),
    };
    Reflection::resolve(local, remote)
}

/// Personalized insight; `fallback` is shown when the remote call is skipped or fails.
pub async fn personal_insight(
    service: Option<&dyn Completion>,
    entries: &[Entry],
    insights: Option<&InsightsSnapshot>,
    fallback: &str,
) -> Reflection {
    let remote = match personal_insight_request(entries, insights) {
        Some(request) => request_completion(service, &request, "personal insight").await,
        None => RemoteOutcome::Failed("not enough entries".to_string()),
    };
    Reflection::resolve(fallback.to_string(), remote)
}

fn excerpt(content: &str) -> String {
    content.chars().take(EXCERPT_CHARS).collect()
}
