//! Response building — from handler output to the platform's reply JSON.

use serde::{Deserialize, Serialize};

/// The finished reply of one request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    /// Spoken text (SSML body without the `<speak>` wrapper). Empty for
    /// log-only replies.
    pub speech: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<String>,

    pub should_end_session: bool,
}

impl SkillResponse {
    /// A reply with no speech and no reprompt.
    pub fn empty() -> Self {
        ResponseBuilder::new().get_response()
    }

    pub fn is_empty(&self) -> bool {
        self.speech.is_empty() && self.reprompt.is_none()
    }

    /// Render into the platform response envelope.
    pub fn to_envelope(
        &self,
        session_attributes: serde_json::Map<String, serde_json::Value>,
        user_agent: Option<&str>,
    ) -> ResponseEnvelope {
        let output_speech = (!self.speech.is_empty()).then(|| OutputSpeech::ssml(&self.speech));
        let reprompt = self.reprompt.as_deref().map(|text| Reprompt {
            output_speech: OutputSpeech::ssml(text),
        });

        ResponseEnvelope {
            version: "1.0".into(),
            session_attributes,
            user_agent: user_agent.map(str::to_string),
            response: ResponseBody {
                output_speech,
                reprompt,
                should_end_session: (!self.is_empty()).then_some(self.should_end_session),
            },
        }
    }
}

/// Accumulates speech, reprompt, and session flag for one reply.
///
/// `get_response` consumes the builder, so a reply can only be finalized once.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    speech: Option<String>,
    reprompt: Option<String>,
    should_end_session: Option<bool>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.speech = Some(text.into());
        self
    }

    /// Set the reprompt. A reprompt keeps the session open unless
    /// overridden with [`with_should_end_session`](Self::with_should_end_session).
    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.reprompt = Some(text.into());
        self
    }

    pub fn with_should_end_session(mut self, end: bool) -> Self {
        self.should_end_session = Some(end);
        self
    }

    pub fn get_response(self) -> SkillResponse {
        let should_end_session = self
            .should_end_session
            .unwrap_or(self.reprompt.is_none());
        SkillResponse {
            speech: self.speech.unwrap_or_default(),
            reprompt: self.reprompt,
            should_end_session,
        }
    }
}

// --- Wire types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,

    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub session_attributes: serde_json::Map<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub ssml: String,
}

impl OutputSpeech {
    pub fn ssml(text: &str) -> Self {
        Self {
            kind: "SSML".into(),
            ssml: format!("<speak>{text}</speak>"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reprompt_keeps_session_open() {
        let response = ResponseBuilder::new()
            .speak("Hola")
            .reprompt("Hola")
            .get_response();
        assert_eq!(response.speech, "Hola");
        assert_eq!(response.reprompt.as_deref(), Some("Hola"));
        assert!(!response.should_end_session);
    }

    #[test]
    fn speech_without_reprompt_ends_session() {
        let response = ResponseBuilder::new().speak("Adios!").get_response();
        assert!(response.reprompt.is_none());
        assert!(response.should_end_session);
    }

    #[test]
    fn explicit_flag_wins() {
        let response = ResponseBuilder::new()
            .speak("one more")
            .with_should_end_session(false)
            .get_response();
        assert!(!response.should_end_session);
    }

    #[test]
    fn empty_response() {
        let response = SkillResponse::empty();
        assert!(response.is_empty());
        assert_eq!(response.speech, "");
        assert!(response.reprompt.is_none());

        let envelope = response.to_envelope(serde_json::Map::new(), None);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["response"], serde_json::json!({}));
    }

    #[test]
    fn envelope_wraps_ssml() {
        let response = ResponseBuilder::new()
            .speak("Hola")
            .reprompt("Otra vez")
            .get_response();
        let mut attrs = serde_json::Map::new();
        attrs.insert("turns".into(), serde_json::json!(1));

        let json = serde_json::to_value(response.to_envelope(attrs, Some("r2skill/0.1.0"))).unwrap();
        assert_eq!(json["response"]["outputSpeech"]["type"], "SSML");
        assert_eq!(json["response"]["outputSpeech"]["ssml"], "<speak>Hola</speak>");
        assert_eq!(
            json["response"]["reprompt"]["outputSpeech"]["ssml"],
            "<speak>Otra vez</speak>"
        );
        assert_eq!(json["response"]["shouldEndSession"], false);
        assert_eq!(json["sessionAttributes"]["turns"], 1);
        assert_eq!(json["userAgent"], "r2skill/0.1.0");
    }
}
