//! In-memory store — useful for testing and ephemeral runs.

use async_trait::async_trait;
use r2skill_core::error::StoreError;
use r2skill_core::store::{AttributeStore, Attributes};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An attribute store backed by a `HashMap`. Contents vanish with the process.
pub struct InMemoryStore {
    records: Arc<RwLock<HashMap<String, Attributes>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of users with a stored bundle.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttributeStore for InMemoryStore {
    fn name(&self) -> &str { "memory" }

    async fn load(&self, id: &str) -> Result<Attributes, StoreError> {
        Ok(self.records.read().await.get(id).cloned().unwrap_or_default())
    }

    async fn save(&self, id: &str, attributes: &Attributes) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(id.to_string(), attributes.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(id).is_some())
    }
}
