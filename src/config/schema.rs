//! Configuration schema for the scenario runner.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Runner settings, read from a camelCase JSON file.
///
/// Missing settings fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerConfig {
    /// Request timeout in milliseconds. Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to automatically follow HTTP redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow; 0 is allowed.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate SSL/TLS certificates.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Headers added to every request unless the scenario sets them.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,

    /// Environment file name, searched for from the suite directory upward.
    #[serde(default = "default_environment_file")]
    pub environment_file: String,

    /// Environment to seed from; falls back to the file's `$active` entry.
    #[serde(default)]
    pub environment: Option<String>,

    /// Variable that relative request urls (`/auth/token`) are resolved
    /// against.
    #[serde(default = "default_base_url_variable")]
    pub base_url_variable: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            default_headers: default_headers(),
            environment_file: default_environment_file(),
            environment: None,
            base_url_variable: default_base_url_variable(),
        }
    }
}

impl RunnerConfig {
    /// Validates the configuration and returns a message describing the
    /// first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if self.environment_file.trim().is_empty() {
            return Err("environmentFile must not be empty".to_string());
        }

        if self.base_url_variable.trim().is_empty() {
            return Err("baseUrlVariable must not be empty".to_string());
        }

        Ok(())
    }

    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }
}

fn default_timeout() -> u64 {
    30000
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_environment_file() -> String {
    "scenario-env.json".to_string()
}

fn default_base_url_variable() -> String {
    "server".to_string()
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert(
        "User-Agent".to_string(),
        format!("api-scenarios/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.timeout, 30000);
        assert!(config.follow_redirects);
        assert_eq!(config.max_redirects, 10);
        assert!(config.validate_ssl);
        assert_eq!(config.environment_file, "scenario-env.json");
        assert_eq!(config.environment, None);
        assert_eq!(config.base_url_variable, "server");
        assert_eq!(config.default_headers.len(), 3);
        assert_eq!(
            config.default_headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(RunnerConfig::default().validate().is_ok());

        let config = RunnerConfig {
            timeout: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err(), "timeout must be greater than 0");

        let config = RunnerConfig {
            base_url_variable: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RunnerConfig {
            max_redirects: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: RunnerConfig =
            serde_json::from_str(r#"{"timeout": 5000, "environment": "staging"}"#).unwrap();

        assert_eq!(config.timeout_duration(), std::time::Duration::from_secs(5));
        assert_eq!(config.environment.as_deref(), Some("staging"));
        assert!(config.validate_ssl);
        assert_eq!(config.base_url_variable, "server");
    }
}
