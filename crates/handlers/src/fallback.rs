//! Fallback handler for utterances the interaction model could not map.

use async_trait::async_trait;
use r2skill_core::envelope::RequestEnvelope;
use r2skill_core::error::Result;
use r2skill_core::handler::{HandlerInput, RequestHandler};
use r2skill_core::response::{ResponseBuilder, SkillResponse};

use crate::speech::{self, intents};

pub struct FallbackHandler;

#[async_trait]
impl RequestHandler for FallbackHandler {
    fn name(&self) -> &str {
        "fallback"
    }

    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.is_intent(&[intents::FALLBACK])
    }

    async fn handle(&self, _input: &mut HandlerInput) -> Result<SkillResponse> {
        Ok(ResponseBuilder::new()
            .speak(speech::FALLBACK)
            .reprompt(speech::FALLBACK)
            .get_response())
    }
}
