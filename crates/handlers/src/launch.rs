//! Launch handler — greets the user when the skill is opened.

use async_trait::async_trait;
use r2skill_core::envelope::{RequestEnvelope, RequestType};
use r2skill_core::error::Result;
use r2skill_core::handler::{HandlerInput, RequestHandler};
use r2skill_core::response::{ResponseBuilder, SkillResponse};

use crate::speech;

pub struct LaunchHandler;

#[async_trait]
impl RequestHandler for LaunchHandler {
    fn name(&self) -> &str {
        "launch"
    }

    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.request_type() == RequestType::LaunchRequest
    }

    async fn handle(&self, _input: &mut HandlerInput) -> Result<SkillResponse> {
        Ok(ResponseBuilder::new()
            .speak(speech::GREETING)
            .reprompt(speech::GREETING)
            .get_response())
    }
}
