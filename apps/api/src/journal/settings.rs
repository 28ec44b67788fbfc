//! Scalar preferences persisted next to the entries.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::journal::store::{KeyValueStore, StoreError};

pub const API_KEY_KEY: &str = "reflect-api-key";
pub const DARK_MODE_KEY: &str = "reflect-dark-mode";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub dark_mode: bool,
}

/// What the API exposes. The key itself is never echoed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsView {
    pub dark_mode: bool,
    pub api_key_configured: bool,
}

/// Partial update. `api_key: ""` removes the stored key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub dark_mode: Option<bool>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Settings {
    pub fn view(&self) -> SettingsView {
        SettingsView {
            dark_mode: self.dark_mode,
            api_key_configured: self.api_key.is_some(),
        }
    }

    /// Absent or unreadable values fall back to defaults.
    pub async fn load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        let api_key = store
            .get(API_KEY_KEY)
            .await?
            .and_then(|raw| match String::from_utf8(raw.to_vec()) {
                Ok(key) => Some(key.trim().to_string()),
                Err(_) => {
                    warn!("Stored API key is not UTF-8; ignoring it");
                    None
                }
            })
            .filter(|key| !key.is_empty());

        let dark_mode = match store.get(DARK_MODE_KEY).await? {
            Some(raw) => match raw.as_ref() {
                b"true" => true,
                b"false" => false,
                other => {
                    warn!("Unrecognised dark-mode value {:?}; using false", String::from_utf8_lossy(other));
                    false
                }
            },
            None => false,
        };

        Ok(Self { api_key, dark_mode })
    }

    /// Persists the changed fields and returns the merged settings.
    pub async fn apply(
        &self,
        update: SettingsUpdate,
        store: &dyn KeyValueStore,
    ) -> Result<Self, StoreError> {
        let mut next = self.clone();

        if let Some(dark_mode) = update.dark_mode {
            let raw: &'static [u8] = if dark_mode { b"true" } else { b"false" };
            store.set(DARK_MODE_KEY, Bytes::from_static(raw)).await?;
            next.dark_mode = dark_mode;
        }

        if let Some(key) = update.api_key {
            let key = key.trim().to_string();
            if key.is_empty() {
                store.remove(API_KEY_KEY).await?;
                next.api_key = None;
            } else {
                store.set(API_KEY_KEY, Bytes::from(key.clone())).await?;
                next.api_key = Some(key);
            }
        }

        Ok(next)
    }
}
