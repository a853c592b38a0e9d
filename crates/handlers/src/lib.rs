//! Request and error handlers of the R2 D2 voice skill.
//!
//! Each handler claims requests by type or intent name. The order
//! returned by [`default_chain`] is the routing priority: the first handler
//! whose `can_handle` accepts a request wins.

pub mod audio;
pub mod cancel_stop;
pub mod error;
pub mod fallback;
pub mod help;
pub mod launch;
pub mod play_audio;
pub mod reflector;
pub mod session_ended;
pub mod speech;
pub mod system_exception;

#[cfg(test)]
mod test_helpers;

use r2skill_core::handler::{HandlerChain, RequestHandler};

pub use audio::{AudioCatalog, DEFAULT_AUDIO_SOURCES};
pub use cancel_stop::CancelAndStopHandler;
pub use error::GenericErrorHandler;
pub use fallback::FallbackHandler;
pub use help::HelpHandler;
pub use launch::LaunchHandler;
pub use play_audio::PlayAudioHandler;
pub use reflector::IntentReflectorHandler;
pub use session_ended::SessionEndedHandler;
pub use system_exception::SystemExceptionHandler;

/// The full handler chain with OS-seeded clip selection.
pub fn default_chain(catalog: AudioCatalog) -> HandlerChain {
    chain_with(Box::new(PlayAudioHandler::new(catalog)))
}

/// Same chain as [`default_chain`] but clip picks are reproducible.
pub fn seeded_chain(catalog: AudioCatalog, seed: u64) -> HandlerChain {
    chain_with(Box::new(PlayAudioHandler::with_seed(catalog, seed)))
}

fn chain_with(play_audio: Box<dyn RequestHandler>) -> HandlerChain {
    let mut chain = HandlerChain::new();
    chain.add_request_handler(Box::new(LaunchHandler));
    chain.add_request_handler(play_audio);
    chain.add_request_handler(Box::new(HelpHandler));
    chain.add_request_handler(Box::new(CancelAndStopHandler));
    chain.add_request_handler(Box::new(SystemExceptionHandler));
    chain.add_request_handler(Box::new(FallbackHandler));
    chain.add_request_handler(Box::new(SessionEndedHandler));
    // Must stay last among request handlers: it accepts every intent.
    chain.add_request_handler(Box::new(IntentReflectorHandler));
    chain.add_error_handler(Box::new(GenericErrorHandler));
    chain
}
