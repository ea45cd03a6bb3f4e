#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod events;
pub mod formatter;
pub mod normalizer;
pub mod pipeline;
pub mod processors;
pub mod publisher;
pub mod utils;
