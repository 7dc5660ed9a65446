//! Configuration management for the scenario runner.
//!
//! Configuration is an explicit value: it is loaded once by the caller and
//! passed to whatever needs it. User settings are merged over the defaults
//! and validated before use.

pub mod schema;

pub use schema::RunnerConfig;

use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Builds a configuration from an optional JSON settings object.
///
/// Fields absent from `settings` keep their defaults.
///
/// # Example
///
/// ```
/// use api_scenarios::config::load_config;
/// use serde_json::json;
///
/// let config = load_config(Some(json!({ "timeout": 60000, "validateSsl": false }))).unwrap();
/// assert_eq!(config.timeout, 60000);
/// assert!(!config.validate_ssl);
/// assert_eq!(config.base_url_variable, "server");
/// ```
pub fn load_config(settings: Option<Value>) -> Result<RunnerConfig, ConfigError> {
    let config = match settings {
        Some(value) => serde_json::from_value::<RunnerConfig>(value)?,
        None => RunnerConfig::default(),
    };

    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Reads and validates a JSON configuration file.
pub fn load_config_file(path: &Path) -> Result<RunnerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    log::debug!("loaded configuration from {}", path.display());
    load_config(Some(serde_json::from_str(&content)?))
}
