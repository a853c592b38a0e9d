//! File-based attribute store — persistent JSON-lines storage.
//!
//! Each line is one user's record: `{"userId": ..., "attributes": {...},
//! "updatedAt": ...}`. The file is loaded on creation and rewritten on
//! every mutation (save, delete).
//!
//! Storage location: `~/.r2skill/data/<region>/<table>.jsonl`

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use r2skill_core::error::StoreError;
use r2skill_core::store::{AttributeStore, Attributes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileRecord {
    user_id: String,
    attributes: Attributes,
    updated_at: DateTime<Utc>,
}

/// A file-backed attribute store using JSONL (one record per line).
pub struct FileStore {
    path: PathBuf,
    records: RwLock<BTreeMap<String, FileRecord>>,
}

impl FileStore {
    /// Create a new file-based store at the given path.
    ///
    /// If the file exists, records are loaded from it.
    /// If the file does not exist, starts empty (file created on first write).
    pub fn new(path: PathBuf) -> Self {
        let records = Self::load_from_disk(&path);
        debug!(path = %path.display(), count = records.len(), "File attribute store loaded");
        Self {
            path,
            records: RwLock::new(records),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> BTreeMap<String, FileRecord> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return BTreeMap::new(), // File doesn't exist yet — start empty
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<FileRecord>(line) {
                Ok(record) => Some((record.user_id.clone(), record)),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupted attribute record");
                    None
                }
            })
            .collect()
    }

    /// Rewrite the whole file. Called with the write lock held so flushes
    /// land in mutation order.
    fn flush(&self, records: &BTreeMap<String, FileRecord>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("Failed to create data directory: {e}"))
            })?;
        }

        let mut content = String::new();
        for record in records.values() {
            let line = serde_json::to_string(record).map_err(|e| {
                StoreError::Unavailable(format!("Failed to serialize attribute record: {e}"))
            })?;
            content.push_str(&line);
            content.push('\n');
        }

        std::fs::write(&self.path, &content).map_err(|e| {
            StoreError::Unavailable(format!("Failed to write attribute file: {e}"))
        })
    }
}

#[async_trait]
impl AttributeStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self, id: &str) -> Result<Attributes, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(id)
            .map(|r| r.attributes.clone())
            .unwrap_or_default())
    }

    async fn save(&self, id: &str, attributes: &Attributes) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let previous = records.insert(
            id.to_string(),
            FileRecord {
                user_id: id.to_string(),
                attributes: attributes.clone(),
                updated_at: Utc::now(),
            },
        );
        if let Err(e) = self.flush(&records) {
            // Keep memory in step with disk.
            match previous {
                Some(record) => records.insert(id.to_string(), record),
                None => records.remove(id),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let Some(removed) = records.remove(id) else {
            return Ok(false);
        };
        if let Err(e) = self.flush(&records) {
            records.insert(id.to_string(), removed);
            return Err(e);
        }
        Ok(true)
    }
}
