//! The entry collection as an immutable value, changed only through `apply`.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::models::{Entry, EntryId};

/// A single change to the collection.
#[derive(Debug, Clone)]
pub enum Mutation {
    Append(Entry),
    Delete(EntryId),
    Clear,
    Replace(Vec<Entry>),
}

/// Entries newest first: an append goes to the front. Cheap to clone; `apply`
/// returns a new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalSnapshot {
    entries: Arc<Vec<Entry>>,
}

impl JournalSnapshot {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn apply(&self, mutation: Mutation) -> Self {
        match mutation {
            Mutation::Append(entry) => {
                let mut entries = Vec::with_capacity(self.entries.len() + 1);
                entries.push(entry);
                entries.extend(self.entries.iter().cloned());
                Self::new(entries)
            }
            Mutation::Delete(id) => Self::new(
                self.entries
                    .iter()
                    .filter(|e| e.id != id)
                    .cloned()
                    .collect(),
            ),
            Mutation::Clear => Self::default(),
            Mutation::Replace(entries) => Self::new(entries),
        }
    }

    /// Strictly greater than every existing id, and at least `now_millis`.
    pub fn next_id(&self, now_millis: i64) -> EntryId {
        let floor = EntryId::try_from(now_millis).unwrap_or(0);
        match self.entries.iter().map(|e| e.id).max() {
            Some(last) => floor.max(last.saturating_add(1)),
            None => floor,
        }
    }

    /// Parses a persisted JSON array. Anything that is not an array reads as
    /// empty; array items that fail to parse or violate entry invariants are
    /// skipped.
    pub fn decode(bytes: &[u8]) -> Self {
        let items = match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                warn!("Stored entries are not a JSON array (found {}); starting empty", kind(&other));
                return Self::default();
            }
            Err(e) => {
                warn!("Stored entries are not valid JSON ({e}); starting empty");
                return Self::default();
            }
        };

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<Entry>(item) {
                Ok(entry) if entry.is_well_formed() => entries.push(entry),
                Ok(entry) => warn!("Skipping malformed stored entry {} at index {index}", entry.id),
                Err(e) => warn!("Skipping unreadable stored entry at index {index}: {e}"),
            }
        }
        Self::new(entries)
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self.entries.as_ref())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use chrono::DateTime;
    use std::collections::BTreeSet;

    fn entry(id: EntryId) -> Entry {
        Entry {
            id,
            content: format!("entry {id}"),
            mood: Mood::Okay,
            sentiment: 0.5,
            themes: BTreeSet::new(),
            created_at: DateTime::parse_from_rfc3339("2024-06-10T08:00:00Z").unwrap(),
            prompt: None,
        }
    }

    fn ids(snapshot: &JournalSnapshot) -> Vec<EntryId> {
        snapshot.entries().iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let original = JournalSnapshot::new(vec![entry(1), entry(2)]);
        let appended = original.apply(Mutation::Append(entry(3)));
        let deleted = appended.apply(Mutation::Delete(2));

        assert_eq!(ids(&original), vec![1, 2]);
        assert_eq!(ids(&appended), vec![3, 1, 2]);
        assert_eq!(ids(&deleted), vec![3, 1]);
        assert!(deleted.apply(Mutation::Clear).is_empty());
        assert_eq!(ids(&original.apply(Mutation::Replace(vec![entry(9)]))), vec![9]);
    }

    #[test]
    fn test_delete_unknown_id_is_a_no_op() {
        let snapshot = JournalSnapshot::new(vec![entry(1)]);
        assert_eq!(snapshot.apply(Mutation::Delete(42)), snapshot);
    }

    #[test]
    fn test_next_id_is_strictly_increasing() {
        let empty = JournalSnapshot::default();
        assert_eq!(empty.next_id(1_000), 1_000);

        let snapshot = JournalSnapshot::new(vec![entry(1_000)]);
        assert_eq!(snapshot.next_id(1_000), 1_001);
        assert_eq!(snapshot.next_id(999), 1_001);
        assert_eq!(snapshot.next_id(5_000), 5_000);
    }

    #[test]
    fn test_decode_skips_bad_items() {
        let json = br#"[
            {"id": 1, "content": "kept", "mood": "good", "sentiment": 0.8,
             "created_at": "2024-06-10T08:00:00Z"},
            {"id": 2, "content": "bad mood", "mood": "ecstatic",
             "created_at": "2024-06-10T08:00:00Z"},
            {"id": 3, "content": "   ", "mood": "okay",
             "created_at": "2024-06-10T08:00:00Z"},
            "not an entry",
            {"id": "4", "content": "legacy", "mood": "low",
             "createdAt": "2024-06-11T08:00:00.000Z"}
        ]"#;
        assert_eq!(ids(&JournalSnapshot::decode(json)), vec![1, 4]);
    }

    #[test]
    fn test_decode_non_array_is_empty() {
        assert!(JournalSnapshot::decode(b"{\"entries\": []}").is_empty());
        assert!(JournalSnapshot::decode(b"not json").is_empty());
        assert!(JournalSnapshot::decode(b"").is_empty());
    }

    #[test]
    fn test_encode_then_decode_preserves_order() {
        let snapshot = JournalSnapshot::new(vec![entry(5), entry(2), entry(9)]);
        let decoded = JournalSnapshot::decode(&snapshot.encode().unwrap());
        assert_eq!(decoded, snapshot);
    }
}
