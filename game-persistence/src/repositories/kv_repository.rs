use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};
use tracing::debug;

use crate::entities::{kv_entries, prelude::*};
use game_core::KeyValueStore;

/// Device store backed by a single SQLite table of string values.
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn keys(&self) -> Result<Vec<String>> {
        let entries = KvEntries::find().all(&self.db).await?;
        Ok(entries.into_iter().map(|entry| entry.key).collect())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = KvEntries::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .with_context(|| format!("failed to read '{}'", key))?;

        Ok(entry.map(|model| model.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let entry = kv_entries::ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(value.to_string()),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        KvEntries::insert(entry)
            .on_conflict(
                OnConflict::column(kv_entries::Column::Key)
                    .update_columns([kv_entries::Column::Value, kv_entries::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .with_context(|| format!("failed to write '{}'", key))?;

        debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        KvEntries::delete_by_id(key.to_string())
            .exec(&self.db)
            .await
            .with_context(|| format!("failed to remove '{}'", key))?;
        Ok(())
    }
}
