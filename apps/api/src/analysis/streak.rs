//! Consecutive-day writing streak.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

use crate::models::Entry;

/// Largest gap between successive writing days that keeps a streak alive.
/// Day-boundary dates are whole days apart, so this admits exactly 1 day.
const MAX_GAP_HOURS: i64 = 36;

/// Calendar day of `ts` as seen from `offset`.
pub fn local_day(ts: &DateTime<FixedOffset>, offset: &FixedOffset) -> NaiveDate {
    ts.with_timezone(offset).date_naive()
}

/// Number of consecutive calendar days with at least one entry, ending today or
/// yesterday relative to `now`. Zero when the latest writing day is older.
pub fn current_streak(entries: &[Entry], now: DateTime<FixedOffset>) -> u32 {
    let offset = *now.offset();
    let mut days: Vec<NaiveDate> = entries
        .iter()
        .map(|e| local_day(&e.created_at, &offset))
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some(&latest) = days.first() else {
        return 0;
    };

    let today = now.date_naive();
    let yesterday = (now - Duration::days(1)).date_naive();
    if latest != today && latest != yesterday {
        return 0;
    }

    let mut streak = 1;
    for pair in days.windows(2) {
        let gap = pair[0].signed_duration_since(pair[1]);
        if gap.num_hours() <= MAX_GAP_HOURS {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}
