//! The skill: interceptor pipeline around the handler chain.

use std::sync::Arc;

use r2skill_core::attributes::AttributesManager;
use r2skill_core::envelope::RequestEnvelope;
use r2skill_core::error::{Error, Result};
use r2skill_core::handler::{ErrorHandler, HandlerChain, HandlerInput, RequestHandler};
use r2skill_core::interceptor::{RequestInterceptor, ResponseInterceptor};
use r2skill_core::response::{ResponseEnvelope, SkillResponse};
use r2skill_core::store::AttributeStore;
use tracing::{debug, info, warn};

/// A fully assembled skill. Cheap to share behind an `Arc`; every
/// invocation gets its own [`HandlerInput`].
pub struct Skill {
    chain: HandlerChain,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    store: Arc<dyn AttributeStore>,
    user_agent: Option<String>,
}

impl Skill {
    pub fn builder() -> SkillBuilder {
        SkillBuilder::new()
    }

    pub fn chain(&self) -> &HandlerChain {
        &self.chain
    }

    pub fn store(&self) -> &Arc<dyn AttributeStore> {
        &self.store
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Handle one request envelope and render the platform reply.
    pub async fn invoke(&self, envelope: RequestEnvelope) -> Result<ResponseEnvelope> {
        let mut input = self.input_for(envelope);
        let response = self.respond(&mut input).await?;
        let session_attributes = std::mem::take(&mut input.session_attributes);
        Ok(response.to_envelope(session_attributes, self.user_agent.as_deref()))
    }

    /// Run the pipeline and return the reply without rendering it.
    pub async fn respond(&self, input: &mut HandlerInput) -> Result<SkillResponse> {
        info!(
            request_id = %input.envelope.request.request_id,
            request_type = %input.envelope.request_type(),
            intent = input.envelope.intent_name().unwrap_or("-"),
            "Request received"
        );

        match self.dispatch(input).await {
            Ok(response) => match self.run_response_interceptors(input, &response).await {
                Ok(()) => Ok(response),
                // State was not flushed; the apology goes out without a second attempt.
                Err(e) => self.handle_error(input, e).await,
            },
            Err(e) => {
                let response = self.handle_error(input, e).await?;
                if let Err(e) = self.run_response_interceptors(input, &response).await {
                    warn!(error = %e, "Response interceptor failed after error handling");
                }
                Ok(response)
            }
        }
    }

    fn input_for(&self, envelope: RequestEnvelope) -> HandlerInput {
        let user_id = envelope.user_id().map(String::from);
        let attributes = AttributesManager::new(self.store.clone(), user_id);
        HandlerInput::new(envelope, attributes)
    }

    async fn dispatch(&self, input: &mut HandlerInput) -> Result<SkillResponse> {
        for interceptor in &self.request_interceptors {
            debug!(interceptor = interceptor.name(), "Running request interceptor");
            interceptor.process(input).await?;
        }
        self.chain.route(input).await
    }

    async fn run_response_interceptors(
        &self,
        input: &mut HandlerInput,
        response: &SkillResponse,
    ) -> Result<()> {
        for interceptor in &self.response_interceptors {
            debug!(interceptor = interceptor.name(), "Running response interceptor");
            interceptor.process(input, response).await?;
        }
        Ok(())
    }

    async fn handle_error(&self, input: &mut HandlerInput, error: Error) -> Result<SkillResponse> {
        match self.chain.select_error_handler(&input.envelope, &error) {
            Some(handler) => {
                debug!(handler = handler.name(), error = %error, "Routing error");
                handler.handle(input, &error).await
            }
            None => {
                warn!(error = %error, "No error handler accepted the error");
                Err(error)
            }
        }
    }
}

/// Assembles a [`Skill`].
///
/// ```ignore
/// let skill = Skill::builder()
///     .with_chain(default_chain(AudioCatalog::default()))
///     .add_request_interceptor(Box::new(LoadPlaybackStateInterceptor))
///     .add_response_interceptor(Box::new(SavePlaybackStateInterceptor))
///     .with_persistence(store)
///     .build()?;
/// ```
#[derive(Default)]
pub struct SkillBuilder {
    chain: HandlerChain,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    store: Option<Arc<dyn AttributeStore>>,
    user_agent: Option<String>,
}

impl SkillBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the handler chain wholesale.
    pub fn with_chain(mut self, chain: HandlerChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn add_request_handler(mut self, handler: Box<dyn RequestHandler>) -> Self {
        self.chain.add_request_handler(handler);
        self
    }

    pub fn add_error_handler(mut self, handler: Box<dyn ErrorHandler>) -> Self {
        self.chain.add_error_handler(handler);
        self
    }

    pub fn add_request_interceptor(mut self, interceptor: Box<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    pub fn add_response_interceptor(mut self, interceptor: Box<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    pub fn with_persistence(mut self, store: Arc<dyn AttributeStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_custom_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<Skill> {
        let store = self.store.ok_or_else(|| Error::Config {
            message: "skill needs an attribute store (with_persistence)".into(),
        })?;
        info!(
            handlers = self.chain.len(),
            request_interceptors = self.request_interceptors.len(),
            response_interceptors = self.response_interceptors.len(),
            store = store.name(),
            "Skill assembled"
        );
        Ok(Skill {
            chain: self.chain,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
            store,
            user_agent: self.user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use r2skill_core::error::{SkillError, StoreError};
    use r2skill_core::response::ResponseBuilder;
    use r2skill_persistence::InMemoryStore;
    use std::sync::Mutex;

    const USER: &str = "amzn1.ask.account.PIPELINE";

    /// Records the order pipeline steps run in.
    #[derive(Clone, Default)]
    struct Trace(Arc<Mutex<Vec<String>>>);

    impl Trace {
        fn push(&self, step: &str) {
            self.0.lock().unwrap().push(step.to_string());
        }

        fn steps(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct StepInterceptor {
        trace: Trace,
        label: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl RequestInterceptor for StepInterceptor {
        fn name(&self) -> &str {
            self.label
        }

        async fn process(&self, _input: &mut HandlerInput) -> Result<()> {
            self.trace.push(self.label);
            if self.fail {
                return Err(Error::Internal(format!("{} failed", self.label)));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ResponseInterceptor for StepInterceptor {
        fn name(&self) -> &str {
            self.label
        }

        async fn process(&self, _input: &mut HandlerInput, _response: &SkillResponse) -> Result<()> {
            self.trace.push(self.label);
            if self.fail {
                return Err(Error::Internal(format!("{} failed", self.label)));
            }
            Ok(())
        }
    }

    struct Speaker {
        trace: Trace,
        fail: bool,
    }

    #[async_trait]
    impl RequestHandler for Speaker {
        fn name(&self) -> &str {
            "speaker"
        }

        fn can_handle(&self, _envelope: &RequestEnvelope) -> bool {
            true
        }

        async fn handle(&self, _input: &mut HandlerInput) -> Result<SkillResponse> {
            self.trace.push("handler");
            if self.fail {
                return Err(Error::Internal("speaker failed".into()));
            }
            Ok(ResponseBuilder::new().speak("ok").get_response())
        }
    }

    struct Apology {
        trace: Trace,
    }

    #[async_trait]
    impl ErrorHandler for Apology {
        fn name(&self) -> &str {
            "apology"
        }

        fn can_handle(&self, _envelope: &RequestEnvelope, _error: &Error) -> bool {
            true
        }

        async fn handle(&self, _input: &mut HandlerInput, _error: &Error) -> Result<SkillResponse> {
            self.trace.push("error_handler");
            Ok(ResponseBuilder::new().speak("sorry").reprompt("sorry").get_response())
        }
    }

    fn step(trace: &Trace, label: &'static str, fail: bool) -> Box<StepInterceptor> {
        Box::new(StepInterceptor {
            trace: trace.clone(),
            label,
            fail,
        })
    }

    fn skill(trace: &Trace, pre_fails: bool, handler_fails: bool, post_fails: bool) -> Skill {
        Skill::builder()
            .add_request_handler(Box::new(Speaker {
                trace: trace.clone(),
                fail: handler_fails,
            }))
            .add_error_handler(Box::new(Apology {
                trace: trace.clone(),
            }))
            .add_request_interceptor(step(trace, "pre", pre_fails))
            .add_response_interceptor(step(trace, "post", post_fails))
            .with_persistence(Arc::new(InMemoryStore::new()))
            .build()
            .unwrap()
    }

    fn speech(envelope: &ResponseEnvelope) -> Option<&str> {
        envelope.response.output_speech.as_ref().map(|s| s.ssml.as_str())
    }

    #[tokio::test]
    async fn success_path_order() {
        let trace = Trace::default();
        let reply = skill(&trace, false, false, false)
            .invoke(RequestEnvelope::launch(USER))
            .await
            .unwrap();
        assert_eq!(speech(&reply), Some("<speak>ok</speak>"));
        assert_eq!(trace.steps(), vec!["pre", "handler", "post"]);
    }

    #[tokio::test]
    async fn request_interceptor_failure_skips_handler() {
        let trace = Trace::default();
        let reply = skill(&trace, true, false, false)
            .invoke(RequestEnvelope::launch(USER))
            .await
            .unwrap();
        assert_eq!(speech(&reply), Some("<speak>sorry</speak>"));
        assert_eq!(trace.steps(), vec!["pre", "error_handler", "post"]);
    }

    #[tokio::test]
    async fn handler_failure_still_flushes() {
        let trace = Trace::default();
        let reply = skill(&trace, false, true, false)
            .invoke(RequestEnvelope::launch(USER))
            .await
            .unwrap();
        assert_eq!(speech(&reply), Some("<speak>sorry</speak>"));
        assert_eq!(trace.steps(), vec!["pre", "handler", "error_handler", "post"]);
    }

    #[tokio::test]
    async fn response_interceptor_failure_is_not_retried() {
        let trace = Trace::default();
        let reply = skill(&trace, false, false, true)
            .invoke(RequestEnvelope::launch(USER))
            .await
            .unwrap();
        assert_eq!(speech(&reply), Some("<speak>sorry</speak>"));
        assert_eq!(trace.steps(), vec!["pre", "handler", "post", "error_handler"]);
    }

    #[tokio::test]
    async fn error_path_interceptor_failure_keeps_apology() {
        let trace = Trace::default();
        let reply = skill(&trace, false, true, true)
            .invoke(RequestEnvelope::launch(USER))
            .await
            .unwrap();
        assert_eq!(speech(&reply), Some("<speak>sorry</speak>"));
        assert_eq!(reply.response.should_end_session, Some(false));
    }

    #[tokio::test]
    async fn unroutable_without_error_handler() {
        let skill = Skill::builder()
            .with_persistence(Arc::new(InMemoryStore::new()))
            .build()
            .unwrap();
        let err = skill
            .invoke(RequestEnvelope::intent(USER, "AnyIntent"))
            .await
            .unwrap_err();
        match err {
            Error::Skill(SkillError::UnroutableRequest { request_type, intent }) => {
                assert_eq!(request_type, "IntentRequest");
                assert_eq!(intent.as_deref(), Some("AnyIntent"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn build_requires_store() {
        assert!(matches!(
            Skill::builder().build(),
            Err(Error::Config { .. })
        ));
    }

    #[tokio::test]
    async fn user_agent_and_session_attributes_echoed() {
        let trace = Trace::default();
        let skill = Skill::builder()
            .add_request_handler(Box::new(Speaker {
                trace: trace.clone(),
                fail: false,
            }))
            .with_persistence(Arc::new(InMemoryStore::new()))
            .with_custom_user_agent("r2skill/test")
            .build()
            .unwrap();

        let mut envelope = RequestEnvelope::launch(USER);
        if let Some(session) = envelope.session.as_mut() {
            session.attributes.insert("turn".into(), serde_json::json!(3));
        }
        let reply = skill.invoke(envelope).await.unwrap();
        assert_eq!(reply.user_agent.as_deref(), Some("r2skill/test"));
        assert_eq!(reply.session_attributes.get("turn"), Some(&serde_json::json!(3)));
    }

    struct BrokenStore;

    #[async_trait]
    impl AttributeStore for BrokenStore {
        fn name(&self) -> &str {
            "broken"
        }

        async fn load(&self, _id: &str) -> std::result::Result<r2skill_core::store::Attributes, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        async fn save(
            &self,
            _id: &str,
            _attributes: &r2skill_core::store::Attributes,
        ) -> std::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        async fn delete(&self, _id: &str) -> std::result::Result<bool, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[tokio::test]
    async fn failing_store_yields_apology() {
        let trace = Trace::default();
        let skill = Skill::builder()
            .add_request_handler(Box::new(Speaker {
                trace: trace.clone(),
                fail: false,
            }))
            .add_error_handler(Box::new(Apology {
                trace: trace.clone(),
            }))
            .add_request_interceptor(Box::new(crate::LoadPlaybackStateInterceptor))
            .add_response_interceptor(Box::new(crate::SavePlaybackStateInterceptor))
            .with_persistence(Arc::new(BrokenStore))
            .build()
            .unwrap();
        assert_eq!(skill.store().name(), "broken");

        let reply = skill.invoke(RequestEnvelope::launch(USER)).await.unwrap();
        assert_eq!(speech(&reply), Some("<speak>sorry</speak>"));
        assert_eq!(trace.steps(), vec!["error_handler"]);
    }
}
