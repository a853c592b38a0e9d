//! PlayAudio handler — plays one random R2 D2 clip.
//!
//! Handles `PlayAudioIntent` and `AMAZON.ResumeIntent`. The chosen clip is
//! embedded as an SSML `<audio>` tag; stored playback state is left alone.

use async_trait::async_trait;
use r2skill_core::envelope::RequestEnvelope;
use r2skill_core::error::Result;
use r2skill_core::handler::{HandlerInput, RequestHandler};
use r2skill_core::response::{ResponseBuilder, SkillResponse};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;
use tracing::info;

use crate::audio::AudioCatalog;
use crate::speech::{self, intents};

pub struct PlayAudioHandler {
    catalog: AudioCatalog,
    rng: Mutex<StdRng>,
}

impl PlayAudioHandler {
    /// Picks seeded from the operating system.
    pub fn new(catalog: AudioCatalog) -> Self {
        Self {
            catalog,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible picks: the same seed yields the same sequence of clips.
    pub fn with_seed(catalog: AudioCatalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn catalog(&self) -> &AudioCatalog {
        &self.catalog
    }

    fn next_clip(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        self.catalog.pick(&mut *rng).to_string()
    }
}

/// SSML for one clip followed by the follow-up question.
pub fn audio_speech(clip: &str) -> String {
    format!("<audio src=\"{clip}\" /> {}", speech::FOLLOW_UP)
}

#[async_trait]
impl RequestHandler for PlayAudioHandler {
    fn name(&self) -> &str {
        "play_audio"
    }

    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.is_intent(&[intents::PLAY_AUDIO, intents::RESUME])
    }

    async fn handle(&self, _input: &mut HandlerInput) -> Result<SkillResponse> {
        let clip = self.next_clip();
        info!(clip = %clip, "Playing clip");

        Ok(ResponseBuilder::new()
            .speak(audio_speech(&clip))
            .reprompt(speech::FOLLOW_UP)
            .get_response())
    }
}
