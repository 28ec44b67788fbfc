//! Owner of the entry collection.
//!
//! One write lock covers mutate, persist and recompute, so readers always see
//! a collection together with the insights derived from it. A failed write
//! leaves the previous state in place.

pub mod demo;
pub mod handlers;
pub mod history;
pub mod settings;
pub mod snapshot;
pub mod store;

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::analysis::insights::{aggregate, InsightsSnapshot};
use crate::analysis::EntryAnalyzer;
use crate::journal::demo::demo_entries;
use crate::journal::snapshot::{JournalSnapshot, Mutation};
use crate::journal::store::{KeyValueStore, StoreError};
use crate::models::{Entry, EntryId, NewEntry};

pub const ENTRIES_KEY: &str = "reflect-entries";

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Entry content must not be empty")]
    EmptyContent,

    #[error("Entry {0} not found")]
    NotFound(EntryId),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to encode entries: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A collection together with the insights computed from it.
#[derive(Debug, Clone)]
pub struct JournalView {
    pub snapshot: JournalSnapshot,
    /// Insights as of the last mutation.
    pub insights: Option<InsightsSnapshot>,
}

impl JournalView {
    fn compute(snapshot: JournalSnapshot, now: DateTime<FixedOffset>) -> Self {
        let insights = aggregate(snapshot.entries(), now);
        Self { snapshot, insights }
    }
}

pub struct Journal {
    store: Arc<dyn KeyValueStore>,
    analyzer: EntryAnalyzer,
    state: RwLock<Arc<JournalView>>,
}

impl Journal {
    /// Reads the persisted collection. Absent or malformed data yields an
    /// empty journal; only a failing store is an error.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        analyzer: EntryAnalyzer,
        now: DateTime<FixedOffset>,
    ) -> Result<Self, StoreError> {
        let snapshot = match store.get(ENTRIES_KEY).await? {
            Some(raw) => JournalSnapshot::decode(&raw),
            None => JournalSnapshot::default(),
        };
        info!("Journal loaded with {} entries", snapshot.len());

        Ok(Self {
            store,
            analyzer,
            state: RwLock::new(Arc::new(JournalView::compute(snapshot, now))),
        })
    }

    pub async fn view(&self) -> Arc<JournalView> {
        Arc::clone(&*self.state.read().await)
    }

    /// Insights for `now`. The windows are measured back from the instant, so
    /// reads never reuse the snapshot cached at mutation time.
    pub async fn insights(&self, now: DateTime<FixedOffset>) -> Option<InsightsSnapshot> {
        let view = self.view().await;
        aggregate(view.snapshot.entries(), now)
    }

    /// Scores `new` and appends it. Blank content is rejected.
    pub async fn add_entry(
        &self,
        new: NewEntry,
        now: DateTime<FixedOffset>,
    ) -> Result<Entry, JournalError> {
        let content = new.content.trim();
        if content.is_empty() {
            return Err(JournalError::EmptyContent);
        }
        let analysis = self.analyzer.analyze(content);

        let mut state = self.state.write().await;
        let entry = Entry {
            id: state.snapshot.next_id(now.timestamp_millis()),
            content: content.to_string(),
            mood: new.mood,
            sentiment: analysis.sentiment,
            themes: analysis.themes,
            created_at: now,
            prompt: new.prompt.filter(|p| !p.trim().is_empty()),
        };
        self.commit(&mut state, Mutation::Append(entry.clone()), now)
            .await?;
        info!(
            "Entry {} added (mood: {}, sentiment: {:.2})",
            entry.id,
            entry.mood.as_str(),
            entry.sentiment
        );
        Ok(entry)
    }

    pub async fn delete_entry(
        &self,
        id: EntryId,
        now: DateTime<FixedOffset>,
    ) -> Result<(), JournalError> {
        let mut state = self.state.write().await;
        if !state.snapshot.contains(id) {
            return Err(JournalError::NotFound(id));
        }
        self.commit(&mut state, Mutation::Delete(id), now).await?;
        info!("Entry {id} deleted");
        Ok(())
    }

    pub async fn clear(&self, now: DateTime<FixedOffset>) -> Result<(), JournalError> {
        let mut state = self.state.write().await;
        let removed = state.snapshot.len();
        self.commit(&mut state, Mutation::Clear, now).await?;
        info!("Journal cleared ({removed} entries removed)");
        Ok(())
    }

    /// Replaces the collection with the demo entries.
    pub async fn seed_demo(&self, now: DateTime<FixedOffset>) -> Result<usize, JournalError> {
        let entries = demo_entries(now);
        let count = entries.len();
        let mut state = self.state.write().await;
        self.commit(&mut state, Mutation::Replace(entries), now)
            .await?;
        info!("Journal seeded with {count} demo entries");
        Ok(count)
    }

    async fn commit(
        &self,
        state: &mut Arc<JournalView>,
        mutation: Mutation,
        now: DateTime<FixedOffset>,
    ) -> Result<(), JournalError> {
        let next = state.snapshot.apply(mutation);
        let persisted = if next.is_empty() {
            self.store.remove(ENTRIES_KEY).await
        } else {
            self.store.set(ENTRIES_KEY, Bytes::from(next.encode()?)).await
        };
        if let Err(e) = persisted {
            warn!("Failed to persist journal; keeping previous state: {e}");
            return Err(e.into());
        }
        *state = Arc::new(JournalView::compute(next, now));
        Ok(())
    }
}
