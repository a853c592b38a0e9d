//! Intent reflector — echoes the name of any intent nobody else claimed.
//!
//! Sits after every specific intent handler so custom intents without
//! a handler still get an audible answer during development.

use async_trait::async_trait;
use r2skill_core::envelope::{RequestEnvelope, RequestType};
use r2skill_core::error::Result;
use r2skill_core::handler::{HandlerInput, RequestHandler};
use r2skill_core::response::{ResponseBuilder, SkillResponse};

use crate::speech;

pub struct IntentReflectorHandler;

#[async_trait]
impl RequestHandler for IntentReflectorHandler {
    fn name(&self) -> &str {
        "intent_reflector"
    }

    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.request_type() == RequestType::IntentRequest
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<SkillResponse> {
        let intent = input.envelope.intent_name().unwrap_or_default();
        Ok(ResponseBuilder::new()
            .speak(format!("{} {intent}", speech::REFLECT_PREFIX))
            .get_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{USER, input};

    #[tokio::test]
    async fn echoes_intent_name() {
        let envelope = RequestEnvelope::intent(USER, "OrderPizzaIntent");
        assert!(IntentReflectorHandler.can_handle(&envelope));

        let (mut input, _) = input(envelope);
        let response = IntentReflectorHandler.handle(&mut input).await.unwrap();
        assert_eq!(response.speech, "Enviaste esto OrderPizzaIntent");
        assert!(response.reprompt.is_none());
        assert!(response.should_end_session);
    }

    #[test]
    fn ignores_non_intents() {
        assert!(!IntentReflectorHandler.can_handle(&RequestEnvelope::launch(USER)));
        assert!(!IntentReflectorHandler.can_handle(&RequestEnvelope::session_ended(USER, "ERROR")));
    }
}
