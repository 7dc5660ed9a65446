//! Environment file data models
//!
//! An environment file groups seed values by target deployment (e.g. "local",
//! "staging") next to a set of shared values. Exactly one named environment is
//! selected per run; its values, layered over the shared ones, seed the
//! [`EnvironmentStore`](super::EnvironmentStore).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single named set of seed values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Environment {
    /// Environment name (e.g., "local", "staging")
    pub name: String,

    /// Variable key-value pairs for this environment
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

impl Environment {
    /// Creates a new environment with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: HashMap::new(),
        }
    }

    /// Gets a variable value by name
    pub fn get(&self, key: &str) -> Option<&String> {
        self.variables.get(key)
    }

    /// Sets a variable value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Container for all environments and shared variables
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Environments {
    /// Named environments
    #[serde(default)]
    pub environments: HashMap<String, Environment>,

    /// Values seeded regardless of the selected environment
    #[serde(default)]
    pub shared: HashMap<String, String>,

    /// Environment selected when the caller does not name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
}

impl Environments {
    /// Creates a new empty Environments collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an environment to the collection
    pub fn add_environment(&mut self, env: Environment) {
        self.environments.insert(env.name.clone(), env);
    }

    /// Gets an environment by name
    pub fn get_environment(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }

    /// Sets the active environment, returning false if it does not exist
    pub fn set_active(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.environments.contains_key(&name) {
            self.active = Some(name);
            true
        } else {
            false
        }
    }

    /// Sets a shared variable
    pub fn set_shared(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.shared.insert(key.into(), value.into());
    }

    /// Computes the seed values for a run.
    ///
    /// `selected` overrides the file's `active` entry. Values of the chosen
    /// environment take precedence over shared values. Returns `None` when a
    /// name is selected that the file does not define.
    pub fn seed_values(&self, selected: Option<&str>) -> Option<HashMap<String, String>> {
        let mut merged = self.shared.clone();

        if let Some(name) = selected.or(self.active.as_deref()) {
            let env = self.environments.get(name)?;
            merged.extend(env.variables.clone());
        }

        Some(merged)
    }

    /// Lists all environment names, sorted
    pub fn list_environments(&self) -> Vec<String> {
        let mut names: Vec<String> = self.environments.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn has_environment(&self, name: &str) -> bool {
        self.environments.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Environments {
        let mut envs = Environments::new();
        envs.set_shared("password", "itsasecret");
        envs.set_shared("server", "http://shared.invalid");

        let mut local = Environment::new("local");
        local.set("server", "http://localhost:8088");
        envs.add_environment(local);

        let mut staging = Environment::new("staging");
        staging.set("server", "https://staging.example.com");
        envs.add_environment(staging);

        envs
    }

    #[test]
    fn test_environment_set_get() {
        let mut env = Environment::new("test");
        env.set("key1", "value1");

        assert_eq!(env.get("key1").unwrap(), "value1");
        assert!(env.get("nonexistent").is_none());
        assert_eq!(env.len(), 1);
        assert!(!env.is_empty());
    }

    #[test]
    fn test_set_active_unknown_keeps_previous() {
        let mut envs = sample();
        assert!(envs.set_active("local"));
        assert!(!envs.set_active("nonexistent"));
        assert_eq!(envs.active.as_deref(), Some("local"));
    }

    #[test]
    fn test_seed_values_selected_overrides_shared() {
        let envs = sample();
        let seeds = envs.seed_values(Some("staging")).unwrap();

        assert_eq!(seeds.get("server").unwrap(), "https://staging.example.com");
        assert_eq!(seeds.get("password").unwrap(), "itsasecret");
    }

    #[test]
    fn test_seed_values_falls_back_to_active() {
        let mut envs = sample();
        envs.set_active("local");

        let seeds = envs.seed_values(None).unwrap();
        assert_eq!(seeds.get("server").unwrap(), "http://localhost:8088");
    }

    #[test]
    fn test_seed_values_shared_only() {
        let envs = sample();
        let seeds = envs.seed_values(None).unwrap();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds.get("server").unwrap(), "http://shared.invalid");
    }

    #[test]
    fn test_seed_values_unknown_environment() {
        let envs = sample();
        assert!(envs.seed_values(Some("production")).is_none());
    }

    #[test]
    fn test_list_environments_sorted() {
        let envs = sample();
        assert_eq!(envs.list_environments(), vec!["local", "staging"]);
    }

    #[test]
    fn test_environments_serialization() {
        let mut envs = sample();
        envs.set_active("local");

        let json = serde_json::to_string(&envs).unwrap();
        let deserialized: Environments = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, envs);
    }
}
