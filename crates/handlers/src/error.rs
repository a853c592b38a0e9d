//! Catch-all error handler.

use async_trait::async_trait;
use r2skill_core::envelope::RequestEnvelope;
use r2skill_core::error::{Error, Result};
use r2skill_core::handler::{ErrorHandler, HandlerInput};
use r2skill_core::response::{ResponseBuilder, SkillResponse};
use tracing::error;

use crate::speech;

/// Accepts every error, logs it, and apologises to the user.
pub struct GenericErrorHandler;

#[async_trait]
impl ErrorHandler for GenericErrorHandler {
    fn name(&self) -> &str {
        "generic_error"
    }

    fn can_handle(&self, _envelope: &RequestEnvelope, _error: &Error) -> bool {
        true
    }

    async fn handle(&self, input: &mut HandlerInput, err: &Error) -> Result<SkillResponse> {
        error!(
            request_type = %input.envelope.request_type(),
            intent = input.envelope.intent_name().unwrap_or("-"),
            error = %err,
            "Request failed"
        );
        Ok(ResponseBuilder::new()
            .speak(speech::APOLOGY)
            .reprompt(speech::APOLOGY)
            .get_response())
    }
}
