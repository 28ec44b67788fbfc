//! Templated weekly recap built from the trailing 7-day window.

use chrono::{DateTime, FixedOffset};

use crate::analysis::insights::{mean_sentiment, rank_themes, window, WEEK_DAYS};
use crate::models::{Entry, Mood};

pub const EMPTY_WEEK_SUMMARY: &str = "Start journaling to see your weekly insights here!";

const POSITIVE_TONE_THRESHOLD: f64 = 0.6;
const CHALLENGING_TONE_THRESHOLD: f64 = 0.4;

const POSITIVE_TONE: &str =
    "Your writing carried a notably positive tone. It seems like things are going well! ";
const CHALLENGING_TONE: &str = "Your entries suggest you've been processing some challenges. \
    Remember, it's okay to not be okay. ";

pub fn compose_weekly_summary(entries: &[Entry], now: DateTime<FixedOffset>) -> String {
    let week = window(entries, now, WEEK_DAYS);
    if week.is_empty() {
        return EMPTY_WEEK_SUMMARY.to_string();
    }

    let count = week.len();
    let noun = if count == 1 { "entry" } else { "entries" };
    let mut summary = format!("This week, you wrote {count} {noun}. ");

    if let Some(top) = rank_themes(week.iter().copied()).first() {
        summary.push_str(&format!(
            "\"{}\" was a recurring theme in your reflections. ",
            top.theme.title()
        ));
    }

    let avg = mean_sentiment(&week).unwrap_or_default();
    if avg > POSITIVE_TONE_THRESHOLD {
        summary.push_str(POSITIVE_TONE);
    } else if avg < CHALLENGING_TONE_THRESHOLD {
        summary.push_str(CHALLENGING_TONE);
    }

    let moods: Vec<Mood> = week.iter().map(|e| e.mood).collect();
    if let Some(mood) = dominant_mood(&moods) {
        summary.push_str(&format!(
            "You most often felt \"{}\" this week.",
            mood.label()
        ));
    }

    summary
}

/// Most frequent mood. On a tie the mood whose occurrence comes last in
/// `moods` wins.
pub fn dominant_mood(moods: &[Mood]) -> Option<Mood> {
    let frequency = |mood: Mood| moods.iter().filter(|&&m| m == mood).count();
    let highest = moods.iter().map(|&m| frequency(m)).max()?;
    moods.iter().rev().copied().find(|&m| frequency(m) == highest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .unwrap()
    }

    fn entry(id: u64, days_ago: i64, mood: Mood, sentiment: f64, themes: &[Theme]) -> Entry {
        Entry {
            id,
            content: format!("entry {id}"),
            mood,
            sentiment,
            themes: themes.iter().copied().collect(),
            created_at: now() - Duration::days(days_ago),
            prompt: None,
        }
    }

    #[test]
    fn test_empty_week_returns_placeholder_even_with_old_entries() {
        let entries = vec![
            entry(1, 10, Mood::Good, 0.9, &[Theme::Work]),
            entry(2, 20, Mood::Low, 0.1, &[]),
        ];
        assert_eq!(compose_weekly_summary(&entries, now()), EMPTY_WEEK_SUMMARY);
        assert_eq!(compose_weekly_summary(&[], now()), EMPTY_WEEK_SUMMARY);
    }

    #[test]
    fn test_single_entry_uses_singular() {
        let entries = vec![entry(1, 1, Mood::Okay, 0.5, &[])];
        let summary = compose_weekly_summary(&entries, now());
        assert_eq!(
            summary,
            "This week, you wrote 1 entry. You most often felt \"Okay\" this week."
        );
    }

    #[test]
    fn test_positive_week_with_theme() {
        let entries = vec![
            entry(1, 1, Mood::Good, 0.9, &[Theme::Nature]),
            entry(2, 2, Mood::Good, 0.8, &[Theme::Nature, Theme::Work]),
        ];
        let summary = compose_weekly_summary(&entries, now());
        assert!(summary.starts_with("This week, you wrote 2 entries. "));
        assert!(summary.contains("\"Nature\" was a recurring theme"));
        assert!(summary.contains("notably positive tone"));
        assert!(summary.ends_with("You most often felt \"Good\" this week."));
    }

    #[test]
    fn test_challenging_week() {
        let entries = vec![
            entry(1, 1, Mood::Low, 0.2, &[]),
            entry(2, 2, Mood::Struggling, 0.1, &[]),
        ];
        let summary = compose_weekly_summary(&entries, now());
        assert!(summary.contains("processing some challenges"));
        assert!(!summary.contains("recurring theme"));
    }

    #[test]
    fn test_middling_sentiment_has_no_tone_clause() {
        let entries = vec![entry(1, 1, Mood::Okay, 0.5, &[]), entry(2, 2, Mood::Okay, 0.6, &[])];
        let summary = compose_weekly_summary(&entries, now());
        assert!(!summary.contains("positive tone"));
        assert!(!summary.contains("challenges"));
    }

    #[test]
    fn test_dominant_mood_prefers_highest_frequency() {
        let moods = [Mood::Low, Mood::Good, Mood::Good, Mood::Amazing];
        assert_eq!(dominant_mood(&moods), Some(Mood::Good));
    }

    #[test]
    fn test_dominant_mood_tie_goes_to_last_occurrence() {
        assert_eq!(
            dominant_mood(&[Mood::Good, Mood::Low, Mood::Good, Mood::Low]),
            Some(Mood::Low)
        );
        assert_eq!(
            dominant_mood(&[Mood::Low, Mood::Good, Mood::Low, Mood::Good]),
            Some(Mood::Good)
        );
        assert_eq!(
            dominant_mood(&[Mood::Amazing, Mood::Okay, Mood::Struggling]),
            Some(Mood::Struggling)
        );
    }

    #[test]
    fn test_dominant_mood_empty() {
        assert_eq!(dominant_mood(&[]), None);
    }

    #[test]
    fn test_summary_tie_break_goes_to_oldest_entry() {
        // Collections are newest first, so the last occurrence is the oldest.
        let entries = vec![
            entry(2, 2, Mood::Low, 0.5, &[]),
            entry(1, 3, Mood::Good, 0.5, &[]),
        ];
        let summary = compose_weekly_summary(&entries, now());
        assert!(summary.ends_with("You most often felt \"Good\" this week."));
    }
}
