//! Insights aggregation: windowed statistics over the entry collection.
//!
//! `aggregate` is a pure function of the entries and `now`. Every window is
//! measured back from `now`; nothing in here reads the clock.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;

use crate::analysis::patterns::{dominant_writing_time, TimeOfDay};
use crate::analysis::sentiment::NEUTRAL_SENTIMENT;
use crate::analysis::streak::current_streak;
use crate::models::{Entry, Mood, Theme};

pub const WEEK_DAYS: i64 = 7;
pub const MONTH_DAYS: i64 = 30;
pub const TOP_THEMES_LIMIT: usize = 5;
pub const TREND_POINTS: usize = 14;
/// Below this many entries there is nothing meaningful to report.
pub const MIN_ENTRIES_FOR_INSIGHTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeCount {
    pub theme: Theme,
    pub count: u32,
}

/// One chart point: display date, sentiment percentage, mood weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub sentiment: u32,
    pub mood: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsSnapshot {
    pub total_entries: usize,
    pub entries_this_week: usize,
    pub entries_this_month: usize,
    /// Mean mood weight over the last 7 days, one decimal.
    pub avg_mood: f64,
    /// Mean sentiment over the last 7 days as a 0-100 percentage.
    pub avg_sentiment: u32,
    pub top_themes: Vec<ThemeCount>,
    pub mood_distribution: BTreeMap<Mood, u32>,
    pub streak: u32,
    pub sentiment_trend: Vec<TrendPoint>,
    pub writing_time: Option<TimeOfDay>,
}

/// Entries created within the trailing `days` days, in collection order.
pub fn window(entries: &[Entry], now: DateTime<FixedOffset>, days: i64) -> Vec<&Entry> {
    let since = now - Duration::days(days);
    entries.iter().filter(|e| e.created_at >= since).collect()
}

/// Returns `None` when there are fewer than `MIN_ENTRIES_FOR_INSIGHTS` entries.
pub fn aggregate(entries: &[Entry], now: DateTime<FixedOffset>) -> Option<InsightsSnapshot> {
    if entries.len() < MIN_ENTRIES_FOR_INSIGHTS {
        return None;
    }

    let last7 = window(entries, now, WEEK_DAYS);
    let last30 = window(entries, now, MONTH_DAYS);

    let avg_mood = if last7.is_empty() {
        0.0
    } else {
        let total: f64 = last7.iter().map(|e| f64::from(e.mood.weight())).sum();
        round_to_tenth(total / last7.len() as f64)
    };

    let avg_sentiment = percent(mean_sentiment(&last7).unwrap_or(NEUTRAL_SENTIMENT));

    let mut top_themes = rank_themes(last30.iter().copied());
    top_themes.truncate(TOP_THEMES_LIMIT);

    let mut mood_distribution = BTreeMap::new();
    for entry in &last30 {
        *mood_distribution.entry(entry.mood).or_insert(0) += 1;
    }

    Some(InsightsSnapshot {
        total_entries: entries.len(),
        entries_this_week: last7.len(),
        entries_this_month: last30.len(),
        avg_mood,
        avg_sentiment,
        top_themes,
        mood_distribution,
        streak: current_streak(entries, now),
        sentiment_trend: sentiment_trend(&last30, now),
        writing_time: dominant_writing_time(entries, now),
    })
}

/// Theme counts sorted by descending count. The sort is stable, so equal counts
/// keep the order in which each theme was first encountered.
pub fn rank_themes<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Vec<ThemeCount> {
    let mut counts: Vec<ThemeCount> = Vec::new();
    for entry in entries {
        for theme in &entry.themes {
            match counts.iter_mut().find(|c| c.theme == *theme) {
                Some(existing) => existing.count += 1,
                None => counts.push(ThemeCount {
                    theme: *theme,
                    count: 1,
                }),
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn mean_sentiment(entries: &[&Entry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: f64 = entries.iter().map(|e| e.sentiment).sum();
    Some(total / entries.len() as f64)
}

/// The `TREND_POINTS` most recent entries of the window, oldest first.
fn sentiment_trend(last30: &[&Entry], now: DateTime<FixedOffset>) -> Vec<TrendPoint> {
    let offset = *now.offset();
    let mut recent: Vec<&Entry> = last30.to_vec();
    recent.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    recent.truncate(TREND_POINTS);
    recent.reverse();

    recent
        .into_iter()
        .map(|e| TrendPoint {
            date: e
                .created_at
                .with_timezone(&offset)
                .format("%b %-d")
                .to_string(),
            sentiment: percent(e.sentiment),
            mood: e.mood.weight(),
        })
        .collect()
}

fn percent(ratio: f64) -> u32 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u32
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
