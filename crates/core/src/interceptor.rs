//! Interceptors — steps that run around every routed request.
//!
//! Request interceptors run before routing, response interceptors after
//! the reply is built (on the error path too).

use async_trait::async_trait;

use crate::error::Result;
use crate::handler::HandlerInput;
use crate::response::SkillResponse;

#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    fn name(&self) -> &str;

    async fn process(&self, input: &mut HandlerInput) -> Result<()>;
}

#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    fn name(&self) -> &str;

    async fn process(&self, input: &mut HandlerInput, response: &SkillResponse) -> Result<()>;
}
