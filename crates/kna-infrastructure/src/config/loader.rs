//! Configuration loader
//!
//! Merges the built-in defaults with the `KEYCLOAK_*` environment variables
//! using Figment. Unknown variables are ignored; a value that does not fit
//! its setting (for example a negative stream size) fails the whole load.
//!
//! Figment's environment provider guesses value types, which would turn a
//! client id like `007` into the number 7. String settings are therefore
//! overlaid again with the raw variable text.

use crate::config::AdapterConfig;
use crate::constants::{CONFIG_ENV_KEYS, CONFIG_ENV_PREFIX, CONFIG_TEXT_KEYS};
use crate::error_ext::ErrorContext;
use crate::logging::parse_log_level;
use figment::Figment;
use figment::providers::{Env, Serialized};
use kna_domain::error::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader reading the `KEYCLOAK_` variables
    pub fn new() -> Self {
        Self {
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AdapterConfig::default()`
    /// 2. Environment variables with prefix (e.g., `KEYCLOAK_NATS_URL`)
    /// 3. The verbatim text of the string-valued variables
    pub fn load(&self) -> Result<AdapterConfig> {
        let verbatim: BTreeMap<String, String> = Env::prefixed(&self.env_prefix)
            .only(CONFIG_TEXT_KEYS)
            .iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect();

        let figment = Figment::new()
            .merge(Serialized::defaults(AdapterConfig::default()))
            .merge(Env::prefixed(&self.env_prefix).only(CONFIG_ENV_KEYS))
            .merge(Serialized::defaults(verbatim));

        let config: AdapterConfig = figment
            .extract()
            .config_context("Invalid adapter configuration")?;

        validate_config(&config)?;
        debug!(
            url = %config.nats_url,
            mode = %config.transport_mode(),
            "Adapter configuration loaded"
        );
        Ok(config)
    }
}

/// Validate configuration values
fn validate_config(config: &AdapterConfig) -> Result<()> {
    if config.nats_url.trim().is_empty() {
        return Err(Error::configuration("NATS URL cannot be empty"));
    }
    if config.nats_connect_timeout_ms == 0 {
        return Err(Error::configuration("Connect timeout cannot be 0"));
    }
    if config.nats_publish_timeout_ms == 0 {
        return Err(Error::configuration("Publish timeout cannot be 0"));
    }
    parse_log_level(&config.nats_log_level)?;
    Ok(())
}
