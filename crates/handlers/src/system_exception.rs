//! Handler for `System.ExceptionEncountered` notifications.
//!
//! The platform reports a failure of a previous response. It is logged and
//! answered with an empty reply.

use async_trait::async_trait;
use r2skill_core::envelope::{RequestEnvelope, RequestType};
use r2skill_core::error::Result;
use r2skill_core::handler::{HandlerInput, RequestHandler};
use r2skill_core::response::SkillResponse;
use tracing::warn;

pub struct SystemExceptionHandler;

#[async_trait]
impl RequestHandler for SystemExceptionHandler {
    fn name(&self) -> &str {
        "system_exception"
    }

    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.request_type() == RequestType::SystemExceptionEncountered
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<SkillResponse> {
        let request = &input.envelope.request;
        warn!(
            error = ?request.error,
            cause = ?request.cause,
            "System exception encountered"
        );
        Ok(SkillResponse::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{USER, input};
    use serde_json::json;

    #[tokio::test]
    async fn replies_empty() {
        let envelope = RequestEnvelope::system_exception(
            USER,
            json!({"type": "INVALID_RESPONSE", "message": "bad ssml"}),
        );
        assert!(SystemExceptionHandler.can_handle(&envelope));

        let (mut input, _) = input(envelope);
        let response = SystemExceptionHandler.handle(&mut input).await.unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn ignores_intents() {
        assert!(!SystemExceptionHandler.can_handle(&RequestEnvelope::intent(USER, "PlayAudioIntent")));
    }
}
