//! Writing-habit views: the 28-day calendar and the dominant time of day.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::analysis::streak::local_day;
use crate::models::{Entry, Mood};

pub const CALENDAR_DAYS: i64 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub has_entry: bool,
    pub count: usize,
    /// Mood of the latest entry written that day.
    pub mood: Option<Mood>,
}

/// Bucket with the most entries; ties go to the earlier bucket.
pub fn dominant_writing_time(entries: &[Entry], now: DateTime<FixedOffset>) -> Option<TimeOfDay> {
    let offset = *now.offset();
    let mut counts = [0usize; 4];
    for entry in entries {
        let hour = entry.created_at.with_timezone(&offset).hour();
        counts[TimeOfDay::from_hour(hour) as usize] += 1;
    }

    let mut best: Option<(TimeOfDay, usize)> = None;
    for (bucket, count) in TimeOfDay::ALL.into_iter().zip(counts) {
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((bucket, count));
        }
    }
    best.map(|(bucket, _)| bucket)
}

/// One cell per day for the last `CALENDAR_DAYS` days, oldest first, ending today.
pub fn writing_calendar(entries: &[Entry], now: DateTime<FixedOffset>) -> Vec<CalendarDay> {
    let offset = *now.offset();
    let today = now.date_naive();

    (0..CALENDAR_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let day_entries: Vec<&Entry> = entries
                .iter()
                .filter(|e| local_day(&e.created_at, &offset) == date)
                .collect();
            let mood = day_entries
                .iter()
                .max_by_key(|e| (e.created_at, e.id))
                .map(|e| e.mood);
            CalendarDay {
                date,
                has_entry: !day_entries.is_empty(),
                count: day_entries.len(),
                mood,
            }
        })
        .collect()
}

pub fn has_written_today(entries: &[Entry], now: DateTime<FixedOffset>) -> bool {
    let offset = *now.offset();
    let today = now.date_naive();
    entries
        .iter()
        .any(|e| local_day(&e.created_at, &offset) == today)
}
