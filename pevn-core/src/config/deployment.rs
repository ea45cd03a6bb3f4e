use crate::utils::first_present_or;

/// Where the notifier is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub environment: String,
    pub region: String,
}

impl DeploymentConfig {
    /// Value used for any setting that was not provided.
    pub const UNKNOWN: &'static str = "unknown";

    /// Build from optional settings; missing or empty ones become `"unknown"`.
    pub fn new(environment: Option<&str>, region: Option<&str>) -> Self {
        Self {
            environment: first_present_or([environment], Self::UNKNOWN),
            region: first_present_or([region], Self::UNKNOWN),
        }
    }

    /// The environment tag that prefixes every notification subject.
    pub fn environment_tag(&self) -> String {
        self.environment.to_uppercase()
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}
