//! # r2skill Core
//!
//! Domain types, traits, and error definitions for the r2skill voice skill
//! backend. This crate has **no framework dependencies**: it defines the
//! request/response model and the seams every other crate implements.
//!
//! ## Design Philosophy
//!
//! Every pluggable piece is a trait here. Implementations live in their
//! respective crates:
//! - `AttributeStore` backends in `r2skill-persistence`
//! - `RequestHandler` / `ErrorHandler` impls in `r2skill-handlers`
//! - interceptors and the dispatch pipeline in `r2skill-runtime`

pub mod error;
pub mod envelope;
pub mod response;
pub mod playback;
pub mod store;
pub mod attributes;
pub mod handler;
pub mod interceptor;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result, SkillError, StoreError};
pub use envelope::{Intent, Request, RequestEnvelope, RequestType, Session, Slot, User};
pub use response::{ResponseBuilder, ResponseEnvelope, SkillResponse};
pub use playback::PlaybackInfo;
pub use store::{AttributeStore, Attributes};
pub use attributes::AttributesManager;
pub use handler::{ErrorHandler, HandlerChain, HandlerInput, RequestHandler};
pub use interceptor::{RequestInterceptor, ResponseInterceptor};
