//! Background processors.
//!
//! - `EventDispatcher`: Receives `RawEvent`, runs the pipeline, publishes notifications

pub mod dispatcher;

pub use dispatcher::{DispatchStats, EventDispatcher};
