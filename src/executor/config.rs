//! HTTP request execution configuration.

use crate::config::RunnerConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Parameters the HTTP client is built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Per-request timeout in milliseconds, covering connect, headers and
    /// body download.
    pub timeout_ms: u64,

    pub follow_redirects: bool,

    /// Only used when `follow_redirects` is true.
    pub max_redirects: u32,

    /// Reject invalid, self-signed or expired certificates.
    pub validate_ssl: bool,

    /// Headers sent with every request unless the request sets the same
    /// header itself (compared case-insensitively).
    pub default_headers: HashMap<String, String>,
}

impl ExecutionConfig {
    /// Returns the timeout as a `Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl From<&RunnerConfig> for ExecutionConfig {
    fn from(config: &RunnerConfig) -> Self {
        Self {
            timeout_ms: config.timeout,
            follow_redirects: config.follow_redirects,
            max_redirects: config.max_redirects,
            validate_ssl: config.validate_ssl,
            default_headers: config.default_headers.clone(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::from(&RunnerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_config_default() {
        let config = ExecutionConfig::default();
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.timeout_duration(), Duration::from_secs(30));
        assert!(config.follow_redirects);
        assert_eq!(
            config.default_headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_from_runner_config() {
        let runner = RunnerConfig {
            timeout: 5_000,
            validate_ssl: false,
            ..RunnerConfig::default()
        };

        let config = ExecutionConfig::from(&runner);
        assert_eq!(config.timeout_duration(), Duration::from_secs(5));
        assert!(!config.validate_ssl);
    }
}
