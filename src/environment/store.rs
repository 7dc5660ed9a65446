//! The in-memory variable store shared by every scenario of a run.

use crate::variables::VarError;
use std::collections::{BTreeMap, HashMap};

/// Mapping of variable name to string value, alive for one suite run.
///
/// Scenarios read from the store while building their requests and write to
/// it during teardown. There is no namespacing and no delete: values are only
/// added or overwritten, so a later scenario always observes the latest value
/// written by any earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentStore {
    values: HashMap<String, String>,
}

impl EnvironmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of `name`.
    ///
    /// An unset key is an error, distinct from a key set to the empty string.
    pub fn get(&self, name: &str) -> Result<&str, VarError> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| VarError::UnboundVariable(name.to_string()))
    }

    /// Sets `name` to `value`, overwriting any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        log::trace!("environment set {} = {:?}", name, value);
        self.values.insert(name, value);
    }

    /// Sets every pair from `values`; used to seed the store before a run.
    pub fn seed<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in values {
            self.set(name, value);
        }
    }

    /// Checks whether `name` has been set.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of bound variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks whether no variable has been bound yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a name-ordered copy of all bindings.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = EnvironmentStore::new();
        store.seed(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = EnvironmentStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_get_unset_key_fails() {
        let store = EnvironmentStore::new();
        assert_eq!(
            store.get("server"),
            Err(VarError::UnboundVariable("server".to_string()))
        );
    }

    #[test]
    fn test_empty_value_is_bound() {
        let mut store = EnvironmentStore::new();
        store.set("blank", "");
        assert_eq!(store.get("blank"), Ok(""));
        assert!(store.contains("blank"));
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = EnvironmentStore::new();
        store.set("org_owner_token", "first");
        store.set("org_owner_token", "second");

        assert_eq!(store.get("org_owner_token"), Ok("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_seed_and_from_iter() {
        let mut store = EnvironmentStore::new();
        store.seed([("server", "http://localhost:8088"), ("user", "bob")]);
        assert_eq!(store.get("server"), Ok("http://localhost:8088"));

        let collected: EnvironmentStore = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected.get("b"), Ok("2"));
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let store: EnvironmentStore = [("zeta", "z"), ("alpha", "a")].into_iter().collect();
        let keys: Vec<_> = store.snapshot().into_keys().collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }

    proptest! {
        #[test]
        fn prop_set_then_get_returns_value(
            seeded in proptest::collection::hash_map("[a-z_]{1,12}", ".{0,20}", 0..8),
            key in "[a-z_]{1,12}",
            value in ".{0,32}",
        ) {
            let mut store: EnvironmentStore = seeded.into_iter().collect();
            store.set(key.clone(), value.clone());
            prop_assert_eq!(store.get(&key), Ok(value.as_str()));
        }
    }
}
