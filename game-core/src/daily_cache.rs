use anyhow::Result;
use chrono::NaiveDate;
use game_types::{DailyArtifact, WordData};
use tracing::debug;

use crate::{DAILY_CACHE_KEY, SharedStore, load_json, save_json};

/// Single-slot cache of one day's word data.
pub struct DailyCache {
    store: SharedStore,
}

impl DailyCache {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Hit only when the stored date equals `date` exactly.
    pub async fn get(&self, date: NaiveDate) -> Result<Option<WordData>> {
        let cached: Option<DailyArtifact> = load_json(self.store.as_ref(), DAILY_CACHE_KEY).await?;
        match cached {
            Some(entry) if entry.date == date => Ok(Some(entry.word_data)),
            Some(entry) => {
                debug!("Cached word is from {}, wanted {}", entry.date, date);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub async fn put(&self, date: NaiveDate, word_data: &WordData) -> Result<()> {
        let entry = DailyArtifact {
            date,
            word_data: word_data.clone(),
        };
        save_json(self.store.as_ref(), DAILY_CACHE_KEY, &entry).await
    }
}
