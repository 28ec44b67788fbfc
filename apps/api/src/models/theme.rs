use serde::{Deserialize, Serialize};

/// Topical tag detected in entry text. Declaration order is the order themes
/// are tested in and the order they appear within an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Work,
    Family,
    Health,
    Relationships,
    Growth,
    Stress,
    Creativity,
    Nature,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Work,
        Theme::Family,
        Theme::Health,
        Theme::Relationships,
        Theme::Growth,
        Theme::Stress,
        Theme::Creativity,
        Theme::Nature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Work => "work",
            Theme::Family => "family",
            Theme::Health => "health",
            Theme::Relationships => "relationships",
            Theme::Growth => "growth",
            Theme::Stress => "stress",
            Theme::Creativity => "creativity",
            Theme::Nature => "nature",
        }
    }

    /// "relationships" -> "Relationships"
    pub fn title(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
