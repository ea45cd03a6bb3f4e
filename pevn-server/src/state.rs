//! Application state shared across all request handlers.

use pevn_core::events::RawEventSender;
use pevn_core::pipeline::Pipeline;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around. Configuration lives inside
/// the pipeline and never changes after startup, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    /// Normalizer, formatter and publisher built from the runtime configuration.
    pub pipeline: Pipeline,
    /// Queue drained by the `EventDispatcher`.
    pub event_tx: RawEventSender,
}

impl AppState {
    pub fn new(pipeline: Pipeline, event_tx: RawEventSender) -> Self {
        Self { pipeline, event_tx }
    }
}
