//! Playback-state interceptors.
//!
//! The load step guarantees every user has a persisted `playbackInfo`
//! record before a handler runs; the save step flushes the bundle after
//! every request, whether or not anything changed.

use async_trait::async_trait;
use r2skill_core::error::Result;
use r2skill_core::handler::HandlerInput;
use r2skill_core::interceptor::{RequestInterceptor, ResponseInterceptor};
use r2skill_core::playback::PlaybackInfo;
use r2skill_core::response::SkillResponse;
use tracing::debug;

/// Seeds a default playback record for users with no stored bundle.
pub struct LoadPlaybackStateInterceptor;

#[async_trait]
impl RequestInterceptor for LoadPlaybackStateInterceptor {
    fn name(&self) -> &str {
        "load_playback_state"
    }

    async fn process(&self, input: &mut HandlerInput) -> Result<()> {
        let attributes = input.attributes.persistent_attributes().await?;
        if attributes.is_empty() {
            debug!(
                user = input.attributes.user_id().unwrap_or("-"),
                "No stored attributes, seeding default playback state"
            );
            input
                .attributes
                .set_persistent_attributes(PlaybackInfo::default_attributes());
        }
        Ok(())
    }
}

/// Writes the attribute bundle back to the store.
pub struct SavePlaybackStateInterceptor;

#[async_trait]
impl ResponseInterceptor for SavePlaybackStateInterceptor {
    fn name(&self) -> &str {
        "save_playback_state"
    }

    async fn process(&self, input: &mut HandlerInput, _response: &SkillResponse) -> Result<()> {
        input.attributes.save_persistent_attributes().await
    }
}
