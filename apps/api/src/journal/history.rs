//! Browsing past entries: text search, mood filter, relative-period grouping.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::analysis::streak::local_day;
use crate::models::{newest_first, Entry, Mood};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryFilter {
    /// Case-insensitive substring of the entry content.
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub mood: Option<Mood>,
}

impl HistoryFilter {
    pub fn matches(&self, entry: &Entry) -> bool {
        let matches_text = match self.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => entry.content.to_lowercase().contains(&q.to_lowercase()),
            _ => true,
        };
        let matches_mood = self.mood.map_or(true, |m| m == entry.mood);
        matches_text && matches_mood
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryGroup {
    pub label: String,
    pub entries: Vec<Entry>,
}

/// Matching entries, newest first.
pub fn search<'a>(entries: &'a [Entry], filter: &HistoryFilter) -> Vec<&'a Entry> {
    newest_first(entries)
        .into_iter()
        .filter(|e| filter.matches(e))
        .collect()
}

/// Groups newest-first entries under "Today", "Yesterday", "This Week"
/// (weeks start on Sunday), "This Month" or "<Month> <Year>". Groups keep the
/// order in which they are first reached.
pub fn group_by_period(entries: &[&Entry], now: DateTime<FixedOffset>) -> Vec<HistoryGroup> {
    let today = local_day(&now, now.offset());
    let mut groups: Vec<HistoryGroup> = Vec::new();

    for entry in entries {
        let label = period_label(local_day(&entry.created_at, now.offset()), today);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.entries.push((*entry).clone()),
            None => groups.push(HistoryGroup {
                label,
                entries: vec![(*entry).clone()],
            }),
        }
    }
    groups
}

fn period_label(day: NaiveDate, today: NaiveDate) -> String {
    let week_start = |d: NaiveDate| d - Duration::days(i64::from(d.weekday().num_days_from_sunday()));

    if day == today {
        "Today".to_string()
    } else if day == today - Duration::days(1) {
        "Yesterday".to_string()
    } else if week_start(day) == week_start(today) {
        "This Week".to_string()
    } else if day.year() == today.year() && day.month() == today.month() {
        "This Month".to_string()
    } else {
        day.format("%B %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    // Thursday
    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 20, 12, 0, 0)
            .unwrap()
    }

    fn entry(id: u64, days_ago: i64, mood: Mood, content: &str) -> Entry {
        Entry {
            id,
            content: content.to_string(),
            mood,
            sentiment: 0.5,
            themes: BTreeSet::new(),
            created_at: now() - Duration::days(days_ago),
            prompt: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_and_newest_first() {
        let entries = vec![
            entry(1, 3, Mood::Good, "Walked by the River"),
            entry(2, 1, Mood::Low, "river was cold"),
            entry(3, 0, Mood::Good, "office day"),
        ];
        let filter = HistoryFilter {
            q: Some("RIVER".to_string()),
            mood: None,
        };
        let ids: Vec<u64> = search(&entries, &filter).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_mood_filter_combines_with_search() {
        let entries = vec![
            entry(1, 3, Mood::Good, "river walk"),
            entry(2, 1, Mood::Low, "river was cold"),
        ];
        let filter = HistoryFilter {
            q: Some("river".to_string()),
            mood: Some(Mood::Good),
        };
        let ids: Vec<u64> = search(&entries, &filter).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let entries = vec![entry(1, 0, Mood::Okay, "a"), entry(2, 0, Mood::Okay, "b")];
        let filter = HistoryFilter {
            q: Some("  ".to_string()),
            mood: None,
        };
        assert_eq!(search(&entries, &filter).len(), 2);
    }

    #[test]
    fn test_group_labels() {
        let entries = vec![
            entry(1, 40, Mood::Okay, "april"),
            entry(2, 10, Mood::Okay, "earlier in june"),
            entry(3, 3, Mood::Okay, "monday"),
            entry(4, 1, Mood::Okay, "yesterday"),
            entry(5, 0, Mood::Okay, "today"),
        ];
        let sorted = search(&entries, &HistoryFilter::default());
        let groups = group_by_period(&sorted, now());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Today", "Yesterday", "This Week", "This Month", "May 2024"]
        );
    }

    #[test]
    fn test_last_week_in_same_month_is_this_month() {
        // Saturday June 15 belongs to the previous Sunday-based week.
        let entries = vec![entry(1, 5, Mood::Okay, "saturday")];
        let sorted = search(&entries, &HistoryFilter::default());
        assert_eq!(group_by_period(&sorted, now())[0].label, "This Month");
    }

    #[test]
    fn test_groups_collect_multiple_entries() {
        let entries = vec![
            entry(1, 0, Mood::Okay, "morning"),
            entry(2, 0, Mood::Okay, "evening"),
        ];
        let sorted = search(&entries, &HistoryFilter::default());
        let groups = group_by_period(&sorted, now());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].entries.len(), 2);
    }
}
