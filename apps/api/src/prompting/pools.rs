//! Prompt pools and the selection decision table.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::models::Mood;

pub const MORNING_PROMPTS: &[&str] = &[
    "What's one thing you're looking forward to today?",
    "How did you sleep, and how is your body feeling this morning?",
    "What intention would you like to set for today?",
    "If today had a color, what would it be and why?",
];

pub const EVENING_PROMPTS: &[&str] = &[
    "What moment from today are you most grateful for?",
    "What challenged you today, and how did you handle it?",
    "What did you learn about yourself today?",
    "If you could relive one moment from today, which would it be?",
];

pub const LOW_MOOD_PROMPTS: &[&str] = &[
    "What's weighing on your mind right now? Let it all out.",
    "What's one small act of kindness you could show yourself today?",
    "When did you last feel at peace? Describe that moment.",
    "What would you tell a friend who was feeling this way?",
];

pub const GENERAL_PROMPTS: &[&str] = &[
    "What's been taking up most of your mental space lately?",
    "Describe a recent moment that made you smile.",
    "What's something you've been avoiding that deserves attention?",
    "How have your relationships been feeling lately?",
    "What does your ideal tomorrow look like?",
];

const MORNING_ENDS_AT: u32 = 12;
const EVENING_STARTS_AT: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    LowMood,
    Morning,
    Evening,
    General,
}

impl PoolKind {
    /// First match wins: a low mood overrides the time of day.
    pub fn for_context(hour: u32, recent_mood: Option<Mood>) -> Self {
        if recent_mood.is_some_and(Mood::is_low) {
            PoolKind::LowMood
        } else if hour < MORNING_ENDS_AT {
            PoolKind::Morning
        } else if hour >= EVENING_STARTS_AT {
            PoolKind::Evening
        } else {
            PoolKind::General
        }
    }
}

/// Candidate prompts per pool. Defaults to the built-in tables.
#[derive(Debug, Clone)]
pub struct PromptPools {
    pub morning: Vec<String>,
    pub evening: Vec<String>,
    pub low_mood: Vec<String>,
    pub general: Vec<String>,
}

impl Default for PromptPools {
    fn default() -> Self {
        let owned = |pool: &[&str]| pool.iter().map(|p| p.to_string()).collect();
        Self {
            morning: owned(MORNING_PROMPTS),
            evening: owned(EVENING_PROMPTS),
            low_mood: owned(LOW_MOOD_PROMPTS),
            general: owned(GENERAL_PROMPTS),
        }
    }
}

impl PromptPools {
    pub fn pool(&self, kind: PoolKind) -> &[String] {
        match kind {
            PoolKind::LowMood => &self.low_mood,
            PoolKind::Morning => &self.morning,
            PoolKind::Evening => &self.evening,
            PoolKind::General => &self.general,
        }
    }

    /// Uniform draw with replacement; repeated calls may return the same prompt.
    /// An empty pool falls back to the general pool, then to the first built-in
    /// general prompt.
    pub fn select<R: Rng + ?Sized>(
        &self,
        hour: u32,
        recent_mood: Option<Mood>,
        rng: &mut R,
    ) -> String {
        let kind = PoolKind::for_context(hour, recent_mood);
        self.pool(kind)
            .choose(rng)
            .or_else(|| self.general.choose(rng))
            .cloned()
            .unwrap_or_else(|| GENERAL_PROMPTS[0].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn contains(pool: &[&str], prompt: &str) -> bool {
        pool.iter().any(|p| *p == prompt)
    }

    #[test]
    fn test_decision_table() {
        assert_eq!(PoolKind::for_context(9, None), PoolKind::Morning);
        assert_eq!(PoolKind::for_context(11, Some(Mood::Good)), PoolKind::Morning);
        assert_eq!(PoolKind::for_context(12, None), PoolKind::General);
        assert_eq!(PoolKind::for_context(17, Some(Mood::Okay)), PoolKind::General);
        assert_eq!(PoolKind::for_context(18, None), PoolKind::Evening);
        assert_eq!(PoolKind::for_context(23, Some(Mood::Low)), PoolKind::LowMood);
        assert_eq!(PoolKind::for_context(9, Some(Mood::Struggling)), PoolKind::LowMood);
    }

    #[test]
    fn test_morning_without_mood_always_draws_morning_pool() {
        let pools = PromptPools::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let prompt = pools.select(9, None, &mut rng);
            assert!(contains(MORNING_PROMPTS, &prompt), "{prompt}");
        }
    }

    #[test]
    fn test_struggling_overrides_morning() {
        let pools = PromptPools::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let prompt = pools.select(9, Some(Mood::Struggling), &mut rng);
            assert!(contains(LOW_MOOD_PROMPTS, &prompt), "{prompt}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let pools = PromptPools::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first: Vec<String> = (0..10).map(|_| pools.select(20, None, &mut a)).collect();
        let second: Vec<String> = (0..10).map(|_| pools.select(20, None, &mut b)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|p| contains(EVENING_PROMPTS, p)));
    }

    #[test]
    fn test_empty_pool_falls_back_to_general() {
        let pools = PromptPools {
            morning: vec![],
            ..PromptPools::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let prompt = pools.select(8, None, &mut rng);
        assert!(contains(GENERAL_PROMPTS, &prompt));
    }

    #[test]
    fn test_swapped_pool_is_used() {
        let pools = PromptPools {
            evening: vec!["Only option".to_string()],
            ..PromptPools::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(pools.select(21, Some(Mood::Good), &mut rng), "Only option");
    }
}
