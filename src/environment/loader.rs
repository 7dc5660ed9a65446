//! Environment file loader
//!
//! Loads `scenario-env.json` style files. The file is looked up next to the
//! suite directory and in up to 3 parent directories, or read from an
//! explicit path.

use super::models::{Environment, Environments};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during environment loading
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// An explicitly named environment file does not exist
    #[error("Environment file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse JSON content
    #[error("Failed to parse environment file: {0}")]
    ParseError(String),

    /// Invalid format or structure in the environment file
    #[error("Invalid environment format: {0}")]
    InvalidFormat(String),

    /// The selected environment is not defined in the file
    #[error("Environment '{0}' not found")]
    UnknownEnvironment(String),

    /// IO error occurred while reading file
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<io::Error> for EnvError {
    fn from(err: io::Error) -> Self {
        EnvError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for EnvError {
    fn from(err: serde_json::Error) -> Self {
        EnvError::ParseError(err.to_string())
    }
}

/// Maximum number of parent directories to search
const MAX_PARENT_SEARCH_DEPTH: usize = 3;

/// Searches `start_dir` and up to 3 parents for a file called `file_name`
/// and loads it. Returns empty environments when nothing is found.
pub fn discover_environments(start_dir: &Path, file_name: &str) -> Result<Environments, EnvError> {
    match find_environment_file(start_dir, file_name) {
        Some(path) => load_environment_file(&path),
        None => {
            log::debug!(
                "no {} found from {}; starting with an empty environment",
                file_name,
                start_dir.display()
            );
            Ok(Environments::new())
        }
    }
}

/// Loads an environment file from an explicit path.
pub fn load_environment_file(path: &Path) -> Result<Environments, EnvError> {
    if !path.is_file() {
        return Err(EnvError::FileNotFound(path.display().to_string()));
    }

    log::debug!("loading environment file {}", path.display());
    let content = fs::read_to_string(path)?;
    let raw: serde_json::Value = serde_json::from_str(&content)?;
    parse_environment_file(raw)
}

fn find_environment_file(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut current_path = start_dir.to_path_buf();

    for _ in 0..=MAX_PARENT_SEARCH_DEPTH {
        let candidate = current_path.join(file_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current_path.parent() {
            Some(parent) => current_path = parent.to_path_buf(),
            None => break,
        }
    }

    None
}

/// Parses the raw JSON into validated Environments structure
fn parse_environment_file(raw: serde_json::Value) -> Result<Environments, EnvError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| EnvError::InvalidFormat("Root must be a JSON object".to_string()))?;

    let mut environments = Environments::new();

    for (key, value) in obj.iter() {
        match key.as_str() {
            "shared" | "$shared" => {
                environments.shared = parse_variable_map(value, "shared")?;
            }
            "active" | "$active" => {
                let Some(name) = value.as_str() else {
                    return Err(EnvError::InvalidFormat(format!(
                        "'{}' must be an environment name, got {}",
                        key, value
                    )));
                };
                environments.active = Some(name.to_string());
            }
            env_name => {
                if !is_valid_identifier(env_name) {
                    return Err(EnvError::InvalidFormat(format!(
                        "Invalid environment name: '{}'. \
                         Names must be alphanumeric with underscores/hyphens",
                        env_name
                    )));
                }

                environments.add_environment(Environment {
                    name: env_name.to_string(),
                    variables: parse_variable_map(value, env_name)?,
                });
            }
        }
    }

    if let Some(ref active_name) = environments.active {
        if !environments.has_environment(active_name) {
            return Err(EnvError::InvalidFormat(format!(
                "Active environment '{}' does not exist",
                active_name
            )));
        }
    }

    Ok(environments)
}

/// Parses a JSON object into string values; scalars are stringified.
fn parse_variable_map(
    value: &serde_json::Value,
    context: &str,
) -> Result<HashMap<String, String>, EnvError> {
    let obj = value
        .as_object()
        .ok_or_else(|| EnvError::InvalidFormat(format!("'{}' must be a JSON object", context)))?;

    let mut map = HashMap::new();

    for (key, val) in obj.iter() {
        let value_str = match val {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Null => String::new(),
            _ => {
                return Err(EnvError::InvalidFormat(format!(
                    "Variable '{}' in '{}' has invalid type (must be string, number, or boolean)",
                    key, context
                )));
            }
        };

        map.insert(key.clone(), value_str);
    }

    Ok(map)
}

/// Environment names start with a letter or underscore and contain only
/// letters, digits, underscores or hyphens. `shared`, `active` and anything
/// `$`-prefixed are reserved.
fn is_valid_identifier(name: &str) -> bool {
    if name == "shared" || name == "active" || name.starts_with('$') {
        return false;
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
