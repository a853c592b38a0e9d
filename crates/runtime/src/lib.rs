//! Request pipeline for r2skill.
//!
//! A [`Skill`] runs every request through the same linear chain:
//! request interceptors, handler routing, error routing on failure, then
//! response interceptors.

pub mod interceptors;
pub mod skill;

pub use interceptors::{LoadPlaybackStateInterceptor, SavePlaybackStateInterceptor};
pub use skill::{Skill, SkillBuilder};

use std::sync::Arc;

use r2skill_config::AppConfig;
use r2skill_core::error::Result;
use r2skill_core::handler::HandlerChain;
use r2skill_core::store::AttributeStore;
use r2skill_handlers::{AudioCatalog, default_chain};

/// Builder preloaded with the playback-state interceptors, the configured
/// user agent, and `store`. Callers add a handler chain.
pub fn skill_builder(config: &AppConfig, store: Arc<dyn AttributeStore>) -> SkillBuilder {
    Skill::builder()
        .add_request_interceptor(Box::new(LoadPlaybackStateInterceptor))
        .add_response_interceptor(Box::new(SavePlaybackStateInterceptor))
        .with_persistence(store)
        .with_custom_user_agent(config.skill.user_agent.clone())
}

/// The production skill: default handler chain over the configured catalog.
pub fn build_skill(config: &AppConfig, store: Arc<dyn AttributeStore>) -> Result<Skill> {
    let catalog = AudioCatalog::from_config(&config.skill.audio_sources)?;
    build_skill_with_chain(config, store, default_chain(catalog))
}

pub fn build_skill_with_chain(
    config: &AppConfig,
    store: Arc<dyn AttributeStore>,
    chain: HandlerChain,
) -> Result<Skill> {
    skill_builder(config, store).with_chain(chain).build()
}
