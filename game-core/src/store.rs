use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::warn;

/// Persisted key holding the current day's word snapshot.
pub const DAILY_CACHE_KEY: &str = "dictionarydle_daily";
/// Persisted key holding [`game_types::PlayerStats`].
pub const STATS_KEY: &str = "dictionarydle_stats";
/// Persisted key set once the player has seen the how-to-play screen.
pub const ONBOARDED_KEY: &str = "hasPlayedDictionarydle";

/// Per-device string storage, the only place game state outlives a session.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Reads a JSON value. A value that no longer parses is reported and treated as absent.
pub async fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Ignoring unreadable value under '{}': {}", key, e);
            Ok(None)
        }
    }
}

pub async fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("failed to serialize value for '{}'", key))?;
    store.set(key, &raw).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_types::PlayerStats;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("key", "value").await.unwrap();
        assert_eq!(store.get("key").await.unwrap().as_deref(), Some("value"));

        store.remove("key").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_json_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(STATS_KEY, "{not json").await.unwrap();

        let stats: Option<PlayerStats> = load_json(&store, STATS_KEY).await.unwrap();
        assert!(stats.is_none());
    }
}
