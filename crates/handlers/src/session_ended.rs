//! Session-ended handler — logs why the session closed.

use async_trait::async_trait;
use r2skill_core::envelope::{RequestEnvelope, RequestType};
use r2skill_core::error::Result;
use r2skill_core::handler::{HandlerInput, RequestHandler};
use r2skill_core::response::SkillResponse;
use tracing::info;

pub struct SessionEndedHandler;

#[async_trait]
impl RequestHandler for SessionEndedHandler {
    fn name(&self) -> &str {
        "session_ended"
    }

    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.request_type() == RequestType::SessionEndedRequest
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<SkillResponse> {
        let reason = input.envelope.request.reason.as_deref().unwrap_or("unknown");
        info!(reason, "Session ended");

        Ok(SkillResponse::empty())
    }
}
