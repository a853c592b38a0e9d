//! Cancel/Stop handler — says goodbye and ends the session.

use async_trait::async_trait;
use r2skill_core::envelope::RequestEnvelope;
use r2skill_core::error::Result;
use r2skill_core::handler::{HandlerInput, RequestHandler};
use r2skill_core::response::{ResponseBuilder, SkillResponse};

use crate::speech::{self, intents};

pub struct CancelAndStopHandler;

#[async_trait]
impl RequestHandler for CancelAndStopHandler {
    fn name(&self) -> &str {
        "cancel_and_stop"
    }

    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.is_intent(&[intents::CANCEL, intents::STOP])
    }

    async fn handle(&self, _input: &mut HandlerInput) -> Result<SkillResponse> {
        Ok(ResponseBuilder::new().speak(speech::FAREWELL).get_response())
    }
}
