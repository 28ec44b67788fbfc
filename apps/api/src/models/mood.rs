use serde::{Deserialize, Serialize};

/// Self-reported mood on a 5-point ordinal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Amazing,
    Good,
    Okay,
    Low,
    Struggling,
}

/// Display and weighting data for a single mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodInfo {
    pub mood: Mood,
    pub weight: u8,
    pub label: &'static str,
    pub emoji: &'static str,
}

/// Process-wide mood table, ordered from most to least positive.
pub const MOODS: &[MoodInfo] = &[
    MoodInfo {
        mood: Mood::Amazing,
        weight: 5,
        label: "Amazing",
        emoji: "✨",
    },
    MoodInfo {
        mood: Mood::Good,
        weight: 4,
        label: "Good",
        emoji: "😊",
    },
    MoodInfo {
        mood: Mood::Okay,
        weight: 3,
        label: "Okay",
        emoji: "😐",
    },
    MoodInfo {
        mood: Mood::Low,
        weight: 2,
        label: "Low",
        emoji: "😔",
    },
    MoodInfo {
        mood: Mood::Struggling,
        weight: 1,
        label: "Struggling",
        emoji: "😢",
    },
];

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Amazing,
        Mood::Good,
        Mood::Okay,
        Mood::Low,
        Mood::Struggling,
    ];

    pub fn info(self) -> &'static MoodInfo {
        // MOODS is declared in variant order
        &MOODS[self as usize]
    }

    pub fn weight(self) -> u8 {
        self.info().weight
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn emoji(self) -> &'static str {
        self.info().emoji
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Amazing => "amazing",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Low => "low",
            Mood::Struggling => "struggling",
        }
    }

    /// Moods that switch prompt selection over to the gentler low-mood pool.
    pub fn is_low(self) -> bool {
        matches!(self, Mood::Low | Mood::Struggling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_table_matches_variant_order() {
        for mood in Mood::ALL {
            assert_eq!(mood.info().mood, mood);
        }
    }

    #[test]
    fn test_weights_run_five_to_one() {
        let weights: Vec<u8> = Mood::ALL.iter().map(|m| m.weight()).collect();
        assert_eq!(weights, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_only_low_and_struggling_are_low() {
        assert!(Mood::Low.is_low());
        assert!(Mood::Struggling.is_low());
        assert!(!Mood::Okay.is_low());
        assert!(!Mood::Amazing.is_low());
    }

    #[test]
    fn test_mood_serde_is_snake_case() {
        let json = serde_json::to_string(&Mood::Struggling).unwrap();
        assert_eq!(json, r#""struggling""#);
        let mood: Mood = serde_json::from_str(r#""okay""#).unwrap();
        assert_eq!(mood, Mood::Okay);
    }

    #[test]
    fn test_as_str_round_trips_through_serde() {
        for mood in Mood::ALL {
            let parsed: Mood = serde_json::from_str(&format!("\"{}\"", mood.as_str())).unwrap();
            assert_eq!(parsed, mood);
        }
    }
}
