//! Key paths
//!
//! A key path is one or more keys applied in order, each one descending a
//! level into nested containers. A plain string is always a single key;
//! dots are only treated as separators through [`KeyPath::dotted`].

use std::fmt;

use crate::error::{Error, Result};

/// Ordered, non-empty list of keys
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    keys: Vec<String>,
}

impl KeyPath {
    /// Build a path from individual keys
    ///
    /// An empty list is accepted here; resolving it always yields `NotFound`.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dot-separated path such as `database.pool.size`
    pub fn dotted(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::parse("key path is empty"));
        }

        let mut keys = Vec::new();
        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(Error::parse("empty key segment")
                    .with_path(path)
                    .with_help("Remove leading, trailing or doubled dots"));
            }
            keys.push(segment.to_string());
        }

        Ok(Self { keys })
    }

    /// The keys in lookup order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of keys (nesting depth)
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True for a path with no keys, which never resolves
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keys.join("."))
    }
}

impl From<&str> for KeyPath {
    fn from(key: &str) -> Self {
        Self {
            keys: vec![key.to_string()],
        }
    }
}

impl From<String> for KeyPath {
    fn from(key: String) -> Self {
        Self { keys: vec![key] }
    }
}

impl From<&String> for KeyPath {
    fn from(key: &String) -> Self {
        Self {
            keys: vec![key.clone()],
        }
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(keys: [&str; N]) -> Self {
        Self::new(keys)
    }
}

impl From<&[&str]> for KeyPath {
    fn from(keys: &[&str]) -> Self {
        Self::new(keys.iter().copied())
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(keys: Vec<String>) -> Self {
        Self { keys }
    }
}
