//! SQLite attribute store.
//!
//! One table, named by configuration, with one row per user:
//!
//! ```sql
//! CREATE TABLE <table> (
//!     user_id    TEXT PRIMARY KEY NOT NULL,
//!     attributes TEXT NOT NULL,   -- JSON object
//!     updated_at TEXT NOT NULL    -- RFC 3339
//! )
//! ```
//!
//! Saves are upserts; the whole bundle is replaced.

use async_trait::async_trait;
use chrono::Utc;
use r2skill_core::error::StoreError;
use r2skill_core::store::{AttributeStore, Attributes};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub struct SqliteStore {
    pool: SqlitePool,
    table: String,
}

impl SqliteStore {
    /// Open (creating if missing) the database file at `path`.
    pub async fn open(path: &Path, table: &str) -> Result<Self, StoreError> {
        check_table_name(table)?;
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to open SQLite: {e}")))?;

        let store = Self::from_pool(pool, table).await?;
        info!(path = %path.display(), table, "SQLite attribute store initialized");
        Ok(store)
    }

    /// An ephemeral in-process database (useful for tests).
    ///
    /// Limited to one connection: every SQLite connection to `:memory:`
    /// gets its own database.
    pub async fn in_memory(table: &str) -> Result<Self, StoreError> {
        check_table_name(table)?;
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::Unavailable(format!("Invalid SQLite options: {e}")))?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to open SQLite: {e}")))?;
        Self::from_pool(pool, table).await
    }

    /// Create from an existing pool.
    pub async fn from_pool(pool: SqlitePool, table: &str) -> Result<Self, StoreError> {
        check_table_name(table)?;
        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.run_migrations().await?;
        Ok(store)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                user_id    TEXT PRIMARY KEY NOT NULL,
                attributes TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            self.table
        );
        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::MigrationFailed(format!("{} table: {e}", self.table)))?;

        debug!(table = %self.table, "SQLite migrations complete");
        Ok(())
    }
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
fn check_table_name(table: &str) -> Result<(), StoreError> {
    if r2skill_config::is_identifier(table) {
        Ok(())
    } else {
        Err(StoreError::InvalidTable(table.to_string()))
    }
}

#[async_trait]
impl AttributeStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn load(&self, id: &str) -> Result<Attributes, StoreError> {
        let sql = format!("SELECT attributes FROM {} WHERE user_id = ?", self.table);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Load failed: {e}")))?;

        let Some(row) = row else {
            return Ok(Attributes::new());
        };

        let raw: String = row
            .try_get("attributes")
            .map_err(|e| StoreError::Corrupted(format!("attributes column: {e}")))?;
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupted(format!("attributes of {id}: {e}")))
    }

    async fn save(&self, id: &str, attributes: &Attributes) -> Result<(), StoreError> {
        let raw = serde_json::to_string(attributes)
            .map_err(|e| StoreError::Unavailable(format!("Failed to serialize attributes: {e}")))?;
        let sql = format!(
            "INSERT INTO {} (user_id, attributes, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(user_id) DO UPDATE SET \
             attributes = excluded.attributes, updated_at = excluded.updated_at",
            self.table
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(raw)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Save failed: {e}")))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE user_id = ?", self.table);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Delete failed: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use r2skill_core::playback::{PLAYBACK_INFO_KEY, PlaybackInfo};
    use tempfile::TempDir;

    #[tokio::test]
    async fn unknown_id_loads_empty() {
        let store = SqliteStore::in_memory("attrs").await.unwrap();
        assert!(store.load("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_replaces_bundle() {
        let store = SqliteStore::in_memory("attrs").await.unwrap();
        store.save("u1", &PlaybackInfo::default_attributes()).await.unwrap();

        let mut updated = Attributes::new();
        PlaybackInfo {
            offset_in_milliseconds: 2500,
            ..PlaybackInfo::default()
        }
        .write_into(&mut updated)
        .unwrap();
        store.save("u1", &updated).await.unwrap();

        let loaded = store.load("u1").await.unwrap();
        assert_eq!(loaded[PLAYBACK_INFO_KEY]["offsetInMilliseconds"], 2500);
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skill.sqlite");

        {
            let store = SqliteStore::open(&path, "r2skill_attributes").await.unwrap();
            store.save("u1", &PlaybackInfo::default_attributes()).await.unwrap();
        }

        let store = SqliteStore::open(&path, "r2skill_attributes").await.unwrap();
        assert_eq!(
            store.load("u1").await.unwrap(),
            PlaybackInfo::default_attributes()
        );
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let store = SqliteStore::in_memory("attrs").await.unwrap();
        store.save("u1", &Attributes::new()).await.unwrap();
        assert!(store.delete("u1").await.unwrap());
        assert!(!store.delete("u1").await.unwrap());
    }

    #[tokio::test]
    async fn rejects_unsafe_table_names() {
        let err = SqliteStore::in_memory("attrs; DROP TABLE x").await.err().unwrap();
        assert!(matches!(err, StoreError::InvalidTable(_)));
    }

    #[tokio::test]
    async fn corrupted_row_is_reported() {
        let store = SqliteStore::in_memory("attrs").await.unwrap();
        sqlx::query("INSERT INTO attrs (user_id, attributes, updated_at) VALUES ('u1', 'nope', '')")
            .execute(&store.pool)
            .await
            .unwrap();
        let err = store.load("u1").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupted(_)));
    }
}
