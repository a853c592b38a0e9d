//! Per-request view of a user's persisted attributes.
//!
//! The manager loads the bundle at most once per request, lets handlers
//! mutate the in-memory copy, and writes it back on demand. Nothing is
//! durable until `save_persistent_attributes` runs.

use std::sync::Arc;
use tracing::debug;

use crate::error::{Result, SkillError};
use crate::playback::PlaybackInfo;
use crate::store::{AttributeStore, Attributes};

pub struct AttributesManager {
    store: Arc<dyn AttributeStore>,
    user_id: Option<String>,
    persistent: Option<Attributes>,
}

impl AttributesManager {
    pub fn new(store: Arc<dyn AttributeStore>, user_id: Option<String>) -> Self {
        Self {
            store,
            user_id,
            persistent: None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn require_user_id(&self) -> Result<&str> {
        self.user_id
            .as_deref()
            .ok_or_else(|| SkillError::MissingIdentifier.into())
    }

    /// Whether the bundle has been loaded or set during this request.
    pub fn is_loaded(&self) -> bool {
        self.persistent.is_some()
    }

    /// The user's bundle, loading it from the store on first access.
    pub async fn persistent_attributes(&mut self) -> Result<&Attributes> {
        if self.persistent.is_none() {
            let id = self.require_user_id()?;
            let loaded = self.store.load(id).await?;
            debug!(
                store = self.store.name(),
                keys = loaded.len(),
                "Persistent attributes loaded"
            );
            self.persistent = Some(loaded);
        }
        Ok(self.persistent.get_or_insert_with(Attributes::new))
    }

    /// Replace the in-memory bundle. Not durable until saved.
    pub fn set_persistent_attributes(&mut self, attributes: Attributes) {
        self.persistent = Some(attributes);
    }

    /// Write the in-memory bundle through to the store.
    ///
    /// Does nothing when the bundle was never loaded or set, so a failed
    /// load can never be followed by an overwrite with an empty bundle.
    pub async fn save_persistent_attributes(&mut self) -> Result<()> {
        let Some(attributes) = self.persistent.as_ref() else {
            debug!("No persistent attributes in this request, skipping save");
            return Ok(());
        };
        let id = self.require_user_id()?;
        self.store.save(id, attributes).await?;
        debug!(store = self.store.name(), "Persistent attributes saved");
        Ok(())
    }

    /// Remove the user's bundle from the store and drop the cached copy.
    pub async fn delete_persistent_attributes(&mut self) -> Result<bool> {
        let id = self.require_user_id()?;
        let deleted = self.store.delete(id).await?;
        self.persistent = None;
        Ok(deleted)
    }

    /// The `playbackInfo` record of the bundle, if present.
    pub async fn playback_info(&mut self) -> Result<Option<PlaybackInfo>> {
        let attributes = self.persistent_attributes().await?;
        Ok(PlaybackInfo::from_attributes(attributes)?)
    }

    /// Replace the `playbackInfo` record in memory, keeping other keys.
    pub async fn set_playback_info(&mut self, info: &PlaybackInfo) -> Result<()> {
        self.persistent_attributes().await?;
        let attributes = self.persistent.get_or_insert_with(Attributes::new);
        info.write_into(attributes)?;
        Ok(())
    }
}
