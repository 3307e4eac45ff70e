//! Process-wide configuration store
//!
//! Values are grouped by namespace (one per application or component) and
//! keyed by name inside it. The resolver only ever reads from a store; the
//! write helpers are here so that applications and tests can seed it.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::container::descend;
use crate::value::Value;

// Global store shared by every `Container::namespace(..)` lookup
static GLOBAL_STORE: OnceLock<ConfigStore> = OnceLock::new();

/// Namespaced key/value store safe for concurrent reads
#[derive(Debug, Default)]
pub struct ConfigStore {
    namespaces: RwLock<HashMap<String, IndexMap<String, Value>>>,
}

impl ConfigStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide store.
    ///
    /// Lazily initialized empty on first access.
    pub fn global() -> &'static ConfigStore {
        GLOBAL_STORE.get_or_init(ConfigStore::new)
    }

    /// Read a single key, cloning the stored value
    pub fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        let namespaces = self.namespaces.read().unwrap_or_else(PoisonError::into_inner);
        namespaces.get(namespace)?.get(key).cloned()
    }

    /// Read a nested key path in one pass, cloning only the value it ends at
    pub fn get_path(&self, namespace: &str, keys: &[String]) -> Option<Value> {
        let (first, rest) = keys.split_first()?;
        let namespaces = self.namespaces.read().unwrap_or_else(PoisonError::into_inner);
        let value = namespaces.get(namespace)?.get(first)?;
        descend(value, rest).cloned()
    }

    /// Check whether any key has been stored under a namespace
    pub fn contains_namespace(&self, namespace: &str) -> bool {
        let namespaces = self.namespaces.read().unwrap_or_else(PoisonError::into_inner);
        namespaces.contains_key(namespace)
    }

    /// Store a value, replacing any previous value for the key
    pub fn put(&self, namespace: impl Into<String>, key: impl Into<String>, value: impl Into<Value>) {
        let mut namespaces = self.namespaces.write().unwrap_or_else(PoisonError::into_inner);
        namespaces
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Store every entry of a mapping under a namespace
    pub fn put_all(&self, namespace: impl Into<String>, entries: IndexMap<String, Value>) {
        let mut namespaces = self.namespaces.write().unwrap_or_else(PoisonError::into_inner);
        namespaces.entry(namespace.into()).or_default().extend(entries);
    }

    /// Drop a namespace and all its keys
    pub fn remove_namespace(&self, namespace: &str) -> Option<IndexMap<String, Value>> {
        let mut namespaces = self.namespaces.write().unwrap_or_else(PoisonError::into_inner);
        namespaces.remove(namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_put_and_get() {
        let store = ConfigStore::new();
        store.put("billing", "currency", "EUR");

        assert_eq!(store.get("billing", "currency"), Some(Value::from("EUR")));
        assert_eq!(store.get("billing", "missing"), None);
        assert_eq!(store.get("other", "currency"), None);
    }

    #[test]
    fn test_get_path() {
        let store = ConfigStore::new();
        let mut pool = IndexMap::new();
        pool.insert("size".to_string(), Value::Integer(10));
        store.put("db", "pool", Value::Mapping(pool));
        store.put("db", "url", "postgres://db");

        let path = |keys: &[&str]| keys.iter().map(|k| k.to_string()).collect::<Vec<_>>();
        assert_eq!(store.get_path("db", &path(&["pool", "size"])), Some(Value::Integer(10)));
        assert_eq!(store.get_path("db", &path(&["url"])), Some(Value::from("postgres://db")));
        assert_eq!(store.get_path("db", &path(&["url", "host"])), None);
        assert_eq!(store.get_path("db", &path(&["pool", "max"])), None);
        assert_eq!(store.get_path("db", &[]), None);
        assert_eq!(store.get_path("cache", &path(&["pool"])), None);
    }

    #[test]
    fn test_put_replaces() {
        let store = ConfigStore::new();
        store.put("app", "port", 80);
        store.put("app", "port", 8080);

        assert_eq!(store.get("app", "port"), Some(Value::Integer(8080)));
    }

    #[test]
    fn test_put_all_merges_into_namespace() {
        let store = ConfigStore::new();
        store.put("app", "a", 1);

        let mut entries = IndexMap::new();
        entries.insert("b".to_string(), Value::Integer(2));
        store.put_all("app", entries);

        assert_eq!(store.get("app", "a"), Some(Value::Integer(1)));
        assert_eq!(store.get("app", "b"), Some(Value::Integer(2)));
    }

    #[test]
    fn test_remove_namespace() {
        let store = ConfigStore::new();
        store.put("gone", "k", true);
        assert!(store.contains_namespace("gone"));

        let removed = store.remove_namespace("gone").unwrap();
        assert_eq!(removed.len(), 1);
        assert!(!store.contains_namespace("gone"));
        assert_eq!(store.get("gone", "k"), None);
    }

    #[test]
    fn test_global_is_shared() {
        ConfigStore::global().put("store_test_global", "k", "v");
        assert_eq!(
            ConfigStore::global().get("store_test_global", "k"),
            Some(Value::from("v"))
        );
        ConfigStore::global().remove_namespace("store_test_global");
    }

    #[test]
    fn test_concurrent_reads() {
        let store = std::sync::Arc::new(ConfigStore::new());
        store.put("app", "k", 7);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.get("app", "k"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(Value::Integer(7)));
        }
    }
}
