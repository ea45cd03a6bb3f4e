use std::time::Duration;

/// Publisher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    /// Topic every notification is published to. Publishing fails while unset.
    pub topic_ref: Option<String>,
    /// Request timeout for network transports.
    pub timeout: Duration,
}

impl PublisherConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            topic_ref: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}
