//! Runtime configuration for the notifier pipeline.
//!
//! These are the validated, immutable values the components are constructed
//! with. Loading them from files, flags and the process environment is the
//! server crate's job.

mod deployment;
mod publisher;

pub use deployment::DeploymentConfig;
pub use publisher::PublisherConfig;

/// Complete runtime configuration, built once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Environment and region stamped onto every event and notification.
    pub deployment: DeploymentConfig,
    /// Topic and transport settings.
    pub publisher: PublisherConfig,
}
