//! Attribute store implementations for r2skill.

pub mod in_memory;
pub mod file_backend;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::InMemoryStore;
pub use file_backend::FileStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use r2skill_config::AppConfig;
use r2skill_core::error::StoreError;
use r2skill_core::store::AttributeStore;
use std::sync::Arc;
use tracing::info;

/// Build the attribute store selected by `persistence.backend`.
pub async fn build_from_config(config: &AppConfig) -> Result<Arc<dyn AttributeStore>, StoreError> {
    let persistence = &config.persistence;

    let store: Arc<dyn AttributeStore> = match persistence.backend.as_str() {
        "memory" => Arc::new(InMemoryStore::new()),
        "file" => Arc::new(FileStore::new(persistence.store_path("jsonl"))),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let path = persistence.store_path("sqlite");
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!("Failed to create data directory: {e}"))
                })?;
            }
            Arc::new(SqliteStore::open(&path, &persistence.table_name).await?)
        }
        other => {
            return Err(StoreError::Unavailable(format!(
                "Persistence backend '{other}' is not available in this build"
            )));
        }
    };

    info!(
        backend = store.name(),
        table = %persistence.table_name,
        region = %persistence.region,
        "Attribute store ready"
    );
    Ok(store)
}
