//! AttributeStore trait — durable key-value storage of per-user attributes.
//!
//! Each user identifier maps to exactly one JSON object ("bundle"). The
//! store knows nothing about what the bundle contains.

use async_trait::async_trait;

use crate::error::StoreError;

/// A persisted attribute bundle.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// The core AttributeStore trait.
///
/// Implementations: SQLite, JSON file, in-memory (for testing).
/// Backends perform exactly one round trip per call: no caching, no
/// retries, no versioning. Concurrent saves for the same id are
/// last-write-wins.
#[async_trait]
pub trait AttributeStore: Send + Sync {
    /// The backend name (e.g., "sqlite", "file", "memory").
    fn name(&self) -> &str;

    /// Load the bundle for `id`. Returns an empty map when none exists.
    async fn load(&self, id: &str) -> std::result::Result<Attributes, StoreError>;

    /// Replace the whole bundle for `id`.
    async fn save(&self, id: &str, attributes: &Attributes) -> std::result::Result<(), StoreError>;

    /// Delete the bundle for `id`. Returns whether one existed.
    async fn delete(&self, id: &str) -> std::result::Result<bool, StoreError>;
}
