//! Event ingestion channels.
//!
//! Raw events accepted by the server are queued here and drained by the
//! `EventDispatcher`, which runs the pipeline for each one.

pub mod channels;

pub use channels::{DEFAULT_CHANNEL_BUFFER, RawEventReceiver, RawEventSender, raw_event_channel};
