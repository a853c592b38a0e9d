//! Handler traits and the ordered handler chain.
//!
//! A request is routed to the **first** request handler whose predicate
//! accepts it; registration order is priority order. Failures raised
//! anywhere in the pipeline go to the first error handler that accepts
//! them.

use async_trait::async_trait;
use tracing::debug;

use crate::attributes::AttributesManager;
use crate::envelope::RequestEnvelope;
use crate::error::{Error, Result, SkillError};
use crate::response::SkillResponse;
use crate::store::Attributes;

/// Everything a handler may read or mutate during one request.
pub struct HandlerInput {
    /// The inbound request.
    pub envelope: RequestEnvelope,

    /// Persistent attributes of the requesting user.
    pub attributes: AttributesManager,

    /// Session attributes, echoed back in the response envelope.
    pub session_attributes: Attributes,
}

impl HandlerInput {
    pub fn new(envelope: RequestEnvelope, attributes: AttributesManager) -> Self {
        let session_attributes = envelope.session_attributes();
        Self {
            envelope,
            attributes,
            session_attributes,
        }
    }
}

/// A request handler: a pure predicate plus the handling function.
///
/// `can_handle` must be side-effect free; only `handle` may touch state or log.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// The unique name of this handler (e.g., "launch", "help").
    fn name(&self) -> &str;

    fn can_handle(&self, envelope: &RequestEnvelope) -> bool;

    async fn handle(&self, input: &mut HandlerInput) -> Result<SkillResponse>;
}

/// Handles any error raised by interceptors or request handlers.
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    fn name(&self) -> &str;

    fn can_handle(&self, envelope: &RequestEnvelope, error: &Error) -> bool;

    async fn handle(&self, input: &mut HandlerInput, error: &Error) -> Result<SkillResponse>;
}

/// Ordered request handlers and error handlers.
#[derive(Default)]
pub struct HandlerChain {
    request_handlers: Vec<Box<dyn RequestHandler>>,
    error_handlers: Vec<Box<dyn ErrorHandler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request handler at the lowest priority so far.
    pub fn add_request_handler(&mut self, handler: Box<dyn RequestHandler>) {
        self.request_handlers.push(handler);
    }

    /// Append an error handler at the lowest priority so far.
    pub fn add_error_handler(&mut self, handler: Box<dyn ErrorHandler>) {
        self.error_handlers.push(handler);
    }

    /// The first request handler whose predicate accepts `envelope`.
    pub fn select(&self, envelope: &RequestEnvelope) -> Option<&dyn RequestHandler> {
        self.request_handlers
            .iter()
            .find(|h| h.can_handle(envelope))
            .map(|h| h.as_ref())
    }

    /// The first error handler that accepts `error`.
    pub fn select_error_handler(
        &self,
        envelope: &RequestEnvelope,
        error: &Error,
    ) -> Option<&dyn ErrorHandler> {
        self.error_handlers
            .iter()
            .find(|h| h.can_handle(envelope, error))
            .map(|h| h.as_ref())
    }

    /// Route to the selected handler and run it.
    pub async fn route(&self, input: &mut HandlerInput) -> Result<SkillResponse> {
        let handler = self.select(&input.envelope).ok_or_else(|| {
            Error::from(SkillError::UnroutableRequest {
                request_type: input.envelope.request_type().to_string(),
                intent: input.envelope.intent_name().map(String::from),
            })
        })?;
        debug!(handler = handler.name(), "Routing request");
        handler.handle(input).await
    }

    /// Request handler names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.request_handlers.iter().map(|h| h.name()).collect()
    }

    /// Error handler names in priority order.
    pub fn error_handler_names(&self) -> Vec<&str> {
        self.error_handlers.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.request_handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.request_handlers.is_empty()
    }
}
