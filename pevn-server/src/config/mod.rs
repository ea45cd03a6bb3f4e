//! Configuration module for pevn-server.
//!
//! Handles loading configuration from an optional TOML file, CLI arguments
//! and environment variables. The result is immutable for the lifetime of
//! the process.

pub mod file;

use crate::config::file::FileConfig;
use pevn_core::config::{DeploymentConfig, PublisherConfig, RuntimeConfig};
use pevn_core::utils::first_present;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Settings given on the command line or through the process environment.
/// These take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub environment: Option<String>,
    pub region: Option<String>,
    /// Region reported by the hosting platform, used when no region is set.
    pub platform_region: Option<String>,
    pub topic: Option<String>,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub runtime: RuntimeConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    overrides: Overrides,
}

impl ConfigLoader {
    /// Create a new config loader. Without a path only overrides and
    /// defaults apply.
    pub fn new(config_path: Option<impl AsRef<Path>>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if one was given
    /// 2. Validate it
    /// 3. Apply CLI/environment overrides
    /// 4. Build the runtime configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = match &self.config_path {
            Some(path) => {
                let config_content = std::fs::read_to_string(path)?;
                toml::from_str(&config_content)?
            }
            None => FileConfig::default(),
        };

        self.validate(&file_config)?;

        Ok(self.build_loaded_config(file_config))
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.publisher.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "publisher.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn build_loaded_config(&self, file_config: FileConfig) -> LoadedConfig {
        let overrides = &self.overrides;

        let environment = first_present([
            overrides.environment.as_deref(),
            file_config.deployment.environment.as_deref(),
        ]);
        let region = first_present([
            overrides.region.as_deref(),
            file_config.deployment.region.as_deref(),
            overrides.platform_region.as_deref(),
        ]);
        let topic_ref = first_present([
            overrides.topic.as_deref(),
            file_config.publisher.topic.as_deref(),
        ]);

        LoadedConfig {
            listen: overrides.listen.unwrap_or(file_config.server.listen),
            runtime: RuntimeConfig {
                deployment: DeploymentConfig::new(environment.as_deref(), region.as_deref()),
                publisher: PublisherConfig {
                    topic_ref,
                    timeout: Duration::from_secs(file_config.publisher.timeout_secs),
                },
            },
        }
    }
}
