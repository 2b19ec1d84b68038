//! Graph configuration with TOML file support.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vouch_types::VouchParams;
use vouch_utils::{try_init_logging, LogFormat, LoggingError};

/// Configuration for a [`crate::VouchGraph`].
///
/// Can be loaded from a TOML file via [`GraphConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so an
/// empty file is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Stake an identity needs before it may vouch.
    #[serde(default)]
    pub minimum_stake: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Rank, score and bootstrap constants (`[params]` table). Kept last so
    /// it serializes after the plain values.
    #[serde(default)]
    pub params: VouchParams,
}

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

fn default_log_level() -> String {
    "info".to_string()
}

impl GraphConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string and validate its parameters.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.params.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        try_init_logging(self.log_format, &self.log_level)
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            minimum_stake: 0,
            log_format: default_log_format(),
            log_level: default_log_level(),
            params: VouchParams::default(),
        }
    }
}
