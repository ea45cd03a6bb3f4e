//! Wire types shared by the Platform Event Notifier crates.
//!
//! Everything in here is plain data: the raw envelope the notifier accepts,
//! the canonical event it normalizes into, the notification it publishes and
//! the payloads exchanged by the HTTP invocations.

pub mod objects;
pub mod timestamp;
