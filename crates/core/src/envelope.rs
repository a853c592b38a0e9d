//! Inbound request envelope — the subset of the voice platform's request
//! JSON that the skill reads.
//!
//! The platform protocol is treated as fixed and external. Only the fields
//! the handlers and the persistence layer need are modelled; everything
//! else is ignored during deserialization.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A complete inbound request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,

    pub request: Request,
}

fn default_version() -> String {
    "1.0".into()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,

    #[serde(default)]
    pub session_id: String,

    /// Per-session attributes echoed back in every response.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemState>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// The request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: RequestType,

    #[serde(default)]
    pub request_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Present on `IntentRequest`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,

    /// Present on `SessionEndedRequest` (`USER_INITIATED`, `ERROR`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Present on `System.ExceptionEncountered` and some `SessionEndedRequest`s.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,

    /// The directive that caused a `System.ExceptionEncountered`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<serde_json::Value>,
}

/// Request types the skill distinguishes. Anything else deserializes to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    LaunchRequest,
    IntentRequest,
    SessionEndedRequest,
    #[serde(rename = "System.ExceptionEncountered")]
    SystemExceptionEncountered,
    #[serde(other)]
    Other,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LaunchRequest => "LaunchRequest",
            Self::IntentRequest => "IntentRequest",
            Self::SessionEndedRequest => "SessionEndedRequest",
            Self::SystemExceptionEncountered => "System.ExceptionEncountered",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub slots: HashMap<String, Slot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RequestEnvelope {
    /// Build a minimal envelope of the given type for `user_id`.
    pub fn new(request_type: RequestType, user_id: impl Into<String>) -> Self {
        let user = User {
            user_id: user_id.into(),
        };
        Self {
            version: default_version(),
            session: Some(Session {
                new: request_type == RequestType::LaunchRequest,
                session_id: format!("session.{}", Uuid::new_v4()),
                attributes: serde_json::Map::new(),
                user: Some(user.clone()),
            }),
            context: Some(Context {
                system: Some(SystemState { user: Some(user) }),
            }),
            request: Request {
                request_type,
                request_id: format!("request.{}", Uuid::new_v4()),
                timestamp: Some(Utc::now().to_rfc3339()),
                locale: None,
                intent: None,
                reason: None,
                error: None,
                cause: None,
            },
        }
    }

    pub fn launch(user_id: impl Into<String>) -> Self {
        Self::new(RequestType::LaunchRequest, user_id)
    }

    pub fn intent(user_id: impl Into<String>, intent_name: impl Into<String>) -> Self {
        let mut envelope = Self::new(RequestType::IntentRequest, user_id);
        envelope.request.intent = Some(Intent {
            name: intent_name.into(),
            slots: HashMap::new(),
            confirmation_status: None,
        });
        envelope
    }

    pub fn session_ended(user_id: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut envelope = Self::new(RequestType::SessionEndedRequest, user_id);
        envelope.request.reason = Some(reason.into());
        envelope
    }

    pub fn system_exception(user_id: impl Into<String>, error: serde_json::Value) -> Self {
        let mut envelope = Self::new(RequestType::SystemExceptionEncountered, user_id);
        envelope.request.error = Some(error);
        envelope
    }

    pub fn request_type(&self) -> RequestType {
        self.request.request_type
    }

    /// The intent name, only for `IntentRequest`s.
    pub fn intent_name(&self) -> Option<&str> {
        if self.request.request_type != RequestType::IntentRequest {
            return None;
        }
        self.request.intent.as_ref().map(|i| i.name.as_str())
    }

    /// Whether this is an `IntentRequest` for one of `names`.
    pub fn is_intent(&self, names: &[&str]) -> bool {
        self.intent_name().is_some_and(|n| names.contains(&n))
    }

    /// The persistence key: `context.System.user.userId`, falling back to
    /// `session.user.userId`.
    pub fn user_id(&self) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|c| c.system.as_ref())
            .and_then(|s| s.user.as_ref())
            .or_else(|| self.session.as_ref().and_then(|s| s.user.as_ref()))
            .map(|u| u.user_id.as_str())
    }

    /// Value of a slot on the current intent, if filled.
    pub fn slot_value(&self, slot: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()
            .and_then(|i| i.slots.get(slot))
            .and_then(|s| s.value.as_deref())
    }

    pub fn session_attributes(&self) -> serde_json::Map<String, serde_json::Value> {
        self.session
            .as_ref()
            .map(|s| s.attributes.clone())
            .unwrap_or_default()
    }
}
