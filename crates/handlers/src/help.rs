//! Help handler.

use async_trait::async_trait;
use r2skill_core::envelope::RequestEnvelope;
use r2skill_core::error::Result;
use r2skill_core::handler::{HandlerInput, RequestHandler};
use r2skill_core::response::{ResponseBuilder, SkillResponse};

use crate::speech::{self, intents};

pub struct HelpHandler;

#[async_trait]
impl RequestHandler for HelpHandler {
    fn name(&self) -> &str {
        "help"
    }

    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.is_intent(&[intents::HELP])
    }

    async fn handle(&self, _input: &mut HandlerInput) -> Result<SkillResponse> {
        Ok(ResponseBuilder::new()
            .speak(speech::HELP)
            .reprompt(speech::HELP)
            .get_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{USER, input};

    #[tokio::test]
    async fn describes_the_robot() {
        let envelope = RequestEnvelope::intent(USER, "AMAZON.HelpIntent");
        assert!(HelpHandler.can_handle(&envelope));

        let (mut input, _) = input(envelope);
        let response = HelpHandler.handle(&mut input).await.unwrap();
        assert_eq!(
            response.speech,
            "Soy un robot de starwars muy conocido, pregunta lo que quieras"
        );
        assert_eq!(response.reprompt.as_deref(), Some(response.speech.as_str()));
    }

    #[test]
    fn ignores_other_requests() {
        assert!(!HelpHandler.can_handle(&RequestEnvelope::launch(USER)));
        assert!(!HelpHandler.can_handle(&RequestEnvelope::intent(USER, "HelpMe")));
    }
}
