//! Shared fixtures for handler tests.

use std::sync::Arc;

use r2skill_core::attributes::AttributesManager;
use r2skill_core::envelope::RequestEnvelope;
use r2skill_core::handler::HandlerInput;
use r2skill_core::playback::PlaybackInfo;
use r2skill_persistence::InMemoryStore;

pub const USER: &str = "amzn1.ask.account.TEST";

/// Handler input over a fresh in-memory store.
pub fn input(envelope: RequestEnvelope) -> (HandlerInput, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let attributes = AttributesManager::new(store.clone(), envelope.user_id().map(String::from));
    (HandlerInput::new(envelope, attributes), store)
}

/// Handler input whose bundle already holds `info`, as after pre-dispatch.
pub fn input_with_playback(envelope: RequestEnvelope, info: &PlaybackInfo) -> HandlerInput {
    let (mut input, _store) = input(envelope);
    let mut attributes = PlaybackInfo::default_attributes();
    info.write_into(&mut attributes).unwrap();
    input.attributes.set_persistent_attributes(attributes);
    input
}
