//! Containers and key lookup
//!
//! A container is anything a key can be looked up in: a namespace of the
//! [`ConfigStore`], an ordered list of pairs, or a mapping. Nested paths
//! descend through values that are themselves containers.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{NotFound, Resolution};
use crate::path::KeyPath;
use crate::store::ConfigStore;
use crate::value::Value;

/// A key/value structure participating in lookup
#[derive(Debug, Clone, Copy)]
pub enum Container<'a> {
    /// A namespace of a configuration store
    Namespace {
        store: &'a ConfigStore,
        name: &'a str,
    },
    /// Ordered pairs; the first matching key wins
    Pairs(&'a [(String, Value)]),
    /// Mapping with unique keys
    Mapping(&'a IndexMap<String, Value>),
}

impl<'a> Container<'a> {
    /// A namespace of the process-wide store
    pub fn namespace(name: &'a str) -> Self {
        Container::Namespace {
            store: ConfigStore::global(),
            name,
        }
    }

    /// A namespace of a specific store
    pub fn in_store(store: &'a ConfigStore, name: &'a str) -> Self {
        Container::Namespace { store, name }
    }

    /// View a value as a container, if it is one
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Mapping(map) => Some(Container::Mapping(map)),
            Value::Pairs(pairs) => Some(Container::Pairs(pairs)),
            _ => None,
        }
    }

    /// One-level lookup of a single key
    pub fn lookup(&self, key: &str) -> Resolution<Value> {
        let found = match self {
            Container::Namespace { store, name } => store.get(name, key),
            Container::Pairs(pairs) => first_match(pairs, key).cloned(),
            Container::Mapping(map) => map.get(key).cloned(),
        };
        found.ok_or(NotFound)
    }

    /// Look up a key path, descending through nested containers
    ///
    /// Every value before the last key must itself be a container. Only the
    /// value at the last key is cloned.
    pub fn lookup_path(&self, path: &KeyPath) -> Resolution<Value> {
        let keys = path.keys();
        let found = match self {
            Container::Namespace { store, name } => {
                let found = store.get_path(name, keys);
                if found.is_none()
                    && log::log_enabled!(log::Level::Trace)
                    && !store.contains_namespace(name)
                {
                    log::trace!("namespace '{}' has no keys stored", name);
                }
                found
            }
            Container::Pairs(_) | Container::Mapping(_) => self.borrowed(keys).cloned(),
        };
        found.ok_or(NotFound)
    }

    // Namespaces live behind the store's lock and cannot hand out references
    fn borrowed(&self, keys: &[String]) -> Option<&'a Value> {
        let (first, rest) = keys.split_first()?;
        let value = match *self {
            Container::Namespace { .. } => return None,
            Container::Pairs(pairs) => first_match(pairs, first)?,
            Container::Mapping(map) => map.get(first)?,
        };
        descend(value, rest)
    }
}

/// Walk `keys` below `value` by reference
pub(crate) fn descend<'v>(mut value: &'v Value, keys: &[String]) -> Option<&'v Value> {
    for key in keys {
        value = match value {
            Value::Mapping(map) => map.get(key)?,
            Value::Pairs(pairs) => first_match(pairs, key)?,
            other => {
                log::trace!(
                    "cannot look up '{}' inside a {}",
                    key,
                    other.type_name()
                );
                return None;
            }
        };
    }
    Some(value)
}

fn first_match<'v>(pairs: &'v [(String, Value)], key: &str) -> Option<&'v Value> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

impl fmt::Display for Container<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Namespace { name, .. } => write!(f, "namespace '{}'", name),
            Container::Pairs(pairs) => write!(f, "pairs ({} entries)", pairs.len()),
            Container::Mapping(map) => write!(f, "mapping ({} keys)", map.len()),
        }
    }
}

impl<'a> From<&'a IndexMap<String, Value>> for Container<'a> {
    fn from(map: &'a IndexMap<String, Value>) -> Self {
        Container::Mapping(map)
    }
}

impl<'a> From<&'a [(String, Value)]> for Container<'a> {
    fn from(pairs: &'a [(String, Value)]) -> Self {
        Container::Pairs(pairs)
    }
}

impl<'a> From<&'a Vec<(String, Value)>> for Container<'a> {
    fn from(pairs: &'a Vec<(String, Value)>) -> Self {
        Container::Pairs(pairs)
    }
}
