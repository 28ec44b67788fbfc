//! Theme extraction: one case-insensitive whole-word keyword alternation per theme.

use std::collections::BTreeSet;

use regex::Regex;

use crate::models::Theme;

/// Theme to keyword table, tested in this order.
pub const THEME_KEYWORDS: &[(Theme, &[&str])] = &[
    (
        Theme::Work,
        &[
            "work", "job", "office", "meeting", "project", "deadline", "boss", "colleague",
            "career",
        ],
    ),
    (
        Theme::Family,
        &[
            "family", "mom", "dad", "parent", "sibling", "brother", "sister", "child", "kid",
        ],
    ),
    (
        Theme::Health,
        &[
            "health", "exercise", "workout", "sleep", "tired", "energy", "sick", "doctor",
        ],
    ),
    (
        Theme::Relationships,
        &[
            "friend",
            "relationship",
            "partner",
            "dating",
            "love",
            "connection",
        ],
    ),
    (
        Theme::Growth,
        &[
            "learn", "grow", "improve", "goal", "achieve", "progress", "develop",
        ],
    ),
    (
        Theme::Stress,
        &["stress", "anxiety", "worry", "pressure", "overwhelm", "busy"],
    ),
    (
        Theme::Creativity,
        &["create", "creative", "art", "write", "music", "idea", "inspire"],
    ),
    (
        Theme::Nature,
        &[
            "nature",
            "outside",
            "walk",
            "park",
            "sun",
            "weather",
            "fresh air",
        ],
    ),
];

#[derive(Debug, Clone)]
pub struct ThemeExtractor {
    patterns: Vec<(Theme, Regex)>,
}

impl Default for ThemeExtractor {
    fn default() -> Self {
        Self::new(THEME_KEYWORDS).expect("built-in theme patterns are valid")
    }
}

impl ThemeExtractor {
    pub fn new(table: &[(Theme, &[&str])]) -> Result<Self, regex::Error> {
        let patterns = table
            .iter()
            .map(|(theme, keywords)| {
                let alternation = keywords
                    .iter()
                    .map(|k| regex::escape(k))
                    .collect::<Vec<_>>()
                    .join("|");
                Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).map(|re| (*theme, re))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn extract(&self, text: &str) -> BTreeSet<Theme> {
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(theme, _)| *theme)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_meeting_detected_without_nature() {
        let themes =
            ThemeExtractor::default().extract("Had a meeting with my boss about the deadline");
        assert!(themes.contains(&Theme::Work));
        assert!(!themes.contains(&Theme::Nature));
    }

    #[test]
    fn test_empty_text_has_no_themes() {
        assert!(ThemeExtractor::default().extract("").is_empty());
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        let extractor = ThemeExtractor::default();
        // "working" and "sunday" are not whole-word hits for work / sun
        assert!(extractor.extract("working through sunday").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let themes = ThemeExtractor::default().extract("MOM called after my WORKOUT");
        assert!(themes.contains(&Theme::Family));
        assert!(themes.contains(&Theme::Health));
    }

    #[test]
    fn test_multi_word_keyword() {
        let themes = ThemeExtractor::default().extract("Needed some fresh air today");
        assert_eq!(themes.into_iter().collect::<Vec<_>>(), vec![Theme::Nature]);
    }

    #[test]
    fn test_entry_can_carry_many_themes() {
        let text = "After work I called my sister, went for a workout with a friend, \
                    set a new goal, felt the pressure ease, played music, then a walk.";
        let themes = ThemeExtractor::default().extract(text);
        assert_eq!(themes.len(), 8);
    }

    #[test]
    fn test_custom_table() {
        let extractor = ThemeExtractor::new(&[(Theme::Creativity, &["guitar"])]).unwrap();
        let themes = extractor.extract("Started learning Guitar");
        assert_eq!(themes.into_iter().collect::<Vec<_>>(), vec![Theme::Creativity]);
    }
}
