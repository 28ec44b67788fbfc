use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::analysis::sentiment::NEUTRAL_SENTIMENT;
use crate::models::{Mood, Theme};

pub type EntryId = u64;

/// One journal record. Immutable once appended; removal is the only change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(deserialize_with = "deserialize_entry_id")]
    pub id: EntryId,
    pub content: String,
    pub mood: Mood,
    /// Lexicon positivity in [0, 1], fixed at creation.
    #[serde(default = "neutral_sentiment")]
    pub sentiment: f64,
    #[serde(default)]
    pub themes: BTreeSet<Theme>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// User input for a new entry, before scoring.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub content: String,
    pub mood: Mood,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl Entry {
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Holds for every entry this service creates; persisted data is checked
    /// against it on load.
    pub fn is_well_formed(&self) -> bool {
        !self.content.trim().is_empty() && (0.0..=1.0).contains(&self.sentiment)
    }
}

/// Entries ordered most recent first. Ties on timestamp fall back to the id.
pub fn newest_first(entries: &[Entry]) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    sorted
}

fn neutral_sentiment() -> f64 {
    NEUTRAL_SENTIMENT
}

/// Older stores wrote ids as numeric strings.
fn deserialize_entry_id<'de, D>(deserializer: D) -> Result<EntryId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(EntryId),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
