//! Canned entries for trying the service without writing two weeks of journal.

use chrono::{DateTime, Duration, FixedOffset};

use crate::models::{Entry, EntryId, Mood, Theme};

struct DemoEntry {
    days_ago: i64,
    mood: Mood,
    sentiment: f64,
    themes: &'static [Theme],
    prompt: &'static str,
    content: &'static str,
}

const DEMO_ENTRIES: &[DemoEntry] = &[
    DemoEntry {
        days_ago: 1,
        mood: Mood::Amazing,
        sentiment: 0.85,
        themes: &[Theme::Nature, Theme::Health, Theme::Work],
        prompt: "What's one thing you're looking forward to today?",
        content: "Had an amazing morning walk today. The sun was just rising and there was this peaceful quiet everywhere. I've noticed that when I start my day with movement, everything else just flows better. Work felt less stressful, and I was more patient in my meetings. I want to make this a regular habit.",
    },
    DemoEntry {
        days_ago: 2,
        mood: Mood::Low,
        sentiment: 0.35,
        themes: &[Theme::Work, Theme::Stress, Theme::Growth],
        prompt: "What's been taking up most of your mental space lately?",
        content: "Feeling a bit overwhelmed with the project deadline approaching. There's so much to do and I'm not sure I can get it all done. Talked to my manager though, and she was understanding. Sometimes I forget that it's okay to ask for help. Need to work on that.",
    },
    DemoEntry {
        days_ago: 3,
        mood: Mood::Good,
        sentiment: 0.92,
        themes: &[Theme::Family, Theme::Relationships],
        prompt: "What moment from today are you most grateful for?",
        content: "Great dinner with the family tonight. Mom made her famous pasta and we just sat around talking for hours. These moments remind me what really matters. Work stress fades away when you're surrounded by people who love you.",
    },
    DemoEntry {
        days_ago: 4,
        mood: Mood::Okay,
        sentiment: 0.45,
        themes: &[Theme::Work],
        prompt: "How are you feeling right now, in this moment?",
        content: "Just an okay day. Nothing special happened. Went through the motions at work, had lunch alone, came home and watched some TV. I feel like I'm in a bit of a rut. Maybe I need to shake things up somehow.",
    },
    DemoEntry {
        days_ago: 5,
        mood: Mood::Amazing,
        sentiment: 0.88,
        themes: &[Theme::Creativity, Theme::Growth],
        prompt: "What's something new you tried recently?",
        content: "Started learning guitar today! My fingers hurt but it feels so good to be learning something new. I've always wanted to play music and I finally just went for it. The instructor said I have a good ear. Small win but I'll take it!",
    },
    DemoEntry {
        days_ago: 6,
        mood: Mood::Low,
        sentiment: 0.3,
        themes: &[Theme::Health, Theme::Stress],
        prompt: "What's weighing on your mind right now?",
        content: "Couldn't sleep last night. My mind kept racing about everything - work, relationships, future plans. I need to find better ways to wind down. Maybe I should try that meditation app Sarah recommended.",
    },
    DemoEntry {
        days_ago: 7,
        mood: Mood::Good,
        sentiment: 0.82,
        themes: &[Theme::Work, Theme::Growth],
        prompt: "What did you accomplish today that you're proud of?",
        content: "Productive day at work. Finally finished that presentation I've been dreading. My colleague gave me really positive feedback which felt great. Celebrated with a nice coffee and some reading time in the park.",
    },
    DemoEntry {
        days_ago: 8,
        mood: Mood::Good,
        sentiment: 0.9,
        themes: &[Theme::Relationships],
        prompt: "Who are you grateful for in your life?",
        content: "Feeling grateful today. Had a video call with my best friend who moved abroad. Even though we're far apart, it feels like nothing has changed between us. True friendships really do stand the test of time and distance.",
    },
    DemoEntry {
        days_ago: 9,
        mood: Mood::Struggling,
        sentiment: 0.25,
        themes: &[Theme::Work, Theme::Stress, Theme::Relationships],
        prompt: "What challenged you today?",
        content: "Struggling today. Had a disagreement with a coworker and it's been bothering me all day. I know I should let it go but I keep replaying the conversation. Why do I do this to myself? Tomorrow is a new day.",
    },
    DemoEntry {
        days_ago: 10,
        mood: Mood::Amazing,
        sentiment: 0.95,
        themes: &[Theme::Health, Theme::Growth],
        prompt: "What progress have you noticed in yourself lately?",
        content: "Went for a long run this morning and hit a new personal best! 5 miles without stopping. A few months ago I could barely do one. This is proof that consistency really does pay off. Feeling strong and capable.",
    },
    DemoEntry {
        days_ago: 11,
        mood: Mood::Good,
        sentiment: 0.78,
        themes: &[Theme::Nature],
        prompt: "What does peace look like for you today?",
        content: "Quiet Sunday. Made pancakes, did some cleaning, read a book by the window. Sometimes the simple days are the best ones. No pressure, no rushing, just being present.",
    },
    DemoEntry {
        days_ago: 12,
        mood: Mood::Okay,
        sentiment: 0.55,
        themes: &[Theme::Work, Theme::Growth],
        prompt: "How did you handle a difficult situation recently?",
        content: "Got some difficult feedback at work today. It stung at first but after sitting with it, I can see they have a point. Growth isn't always comfortable. I'm going to use this as motivation to improve rather than letting it bring me down.",
    },
    DemoEntry {
        days_ago: 13,
        mood: Mood::Amazing,
        sentiment: 0.91,
        themes: &[Theme::Creativity, Theme::Growth],
        prompt: "When did you last feel fully in the zone?",
        content: "Creative energy is flowing today! Spent hours working on a side project and completely lost track of time. This is the state I want to be in more often - fully engaged, curious, making things. Need to protect time for this.",
    },
    DemoEntry {
        days_ago: 14,
        mood: Mood::Low,
        sentiment: 0.4,
        themes: &[Theme::Family, Theme::Relationships],
        prompt: "What memory came up for you today?",
        content: "Missing home today. Saw a photo that reminded me of childhood summers at grandma's house. Those carefree days feel so far away now. Called mom and it helped. Connection is medicine.",
    },
];

/// Demo entries dated relative to `now`, newest first like the journal itself.
/// Ids are the creation timestamps in milliseconds.
pub fn demo_entries(now: DateTime<FixedOffset>) -> Vec<Entry> {
    let mut entries: Vec<Entry> = DEMO_ENTRIES
        .iter()
        .map(|demo| {
            let created_at = now - Duration::days(demo.days_ago);
            Entry {
                id: EntryId::try_from(created_at.timestamp_millis()).unwrap_or(0),
                content: demo.content.to_string(),
                mood: demo.mood,
                sentiment: demo.sentiment,
                themes: demo.themes.iter().copied().collect(),
                created_at,
                prompt: Some(demo.prompt.to_string()),
            }
        })
        .collect();
    entries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::insights::aggregate;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_demo_entries_span_two_weeks_newest_first() {
        let entries = demo_entries(now());
        assert_eq!(entries.len(), 14);
        assert!(entries.windows(2).all(|w| w[0].id > w[1].id));
        assert_eq!(entries[0].created_at, now() - Duration::days(1));
        assert_eq!(entries[13].created_at, now() - Duration::days(14));
        assert!(entries.iter().all(Entry::is_well_formed));
    }

    #[test]
    fn test_demo_entries_produce_insights() {
        let insights = aggregate(&demo_entries(now()), now()).unwrap();
        assert_eq!(insights.total_entries, 14);
        // Most recent entry was yesterday; every day back to 14 days ago has one.
        assert_eq!(insights.streak, 14);
        assert_eq!(insights.entries_this_week, 7);
    }
}
