//! The resolution pipeline
//!
//! Every accessor runs the same stages:
//!
//! 1. lookup of the (possibly nested) key in the container,
//! 2. environment indirection of the raw value,
//! 3. for typed accessors, permissive coercion.
//!
//! Nothing is cached; every call reads the container and the environment
//! afresh.

use crate::coerce;
use crate::container::Container;
use crate::env::Env;
use crate::error::{Error, Resolution, Result};
use crate::indirection;
use crate::path::KeyPath;
use crate::value::Value;

/// Resolves keys against containers and an environment source
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    env: Env,
}

impl Resolver {
    /// Create a resolver reading the process environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with a specific environment source
    pub fn with_env(env: Env) -> Self {
        Self { env }
    }

    /// Find the raw stored value for a key path
    pub fn lookup(&self, container: &Container<'_>, path: impl Into<KeyPath>) -> Resolution<Value> {
        let path = path.into();
        log::trace!("Looking up '{}' in {}", path, container);
        container.lookup_path(&path)
    }

    /// Interpret a raw value, following environment references
    pub fn resolve_indirection(&self, raw: &Value) -> Resolution<Value> {
        indirection::resolve_indirection(raw, &self.env)
    }

    /// Look up and resolve a key path
    pub fn fetch(&self, container: &Container<'_>, path: impl Into<KeyPath>) -> Resolution<Value> {
        let raw = self.lookup(container, path)?;
        self.resolve_indirection(&raw)
    }

    /// Like [`fetch`](Self::fetch), but a missing value is an error
    pub fn fetch_or_raise(&self, container: &Container<'_>, path: impl Into<KeyPath>) -> Result<Value> {
        let path = path.into();
        self.fetch(container, &path)
            .map_err(|_| Error::configuration_missing(container.to_string(), path.to_string()))
    }

    /// Resolve a key path, returning `default` when nothing is found
    pub fn get(
        &self,
        container: &Container<'_>,
        path: impl Into<KeyPath>,
        default: impl Into<Value>,
    ) -> Value {
        self.fetch(container, path).unwrap_or_else(|_| default.into())
    }

    /// Resolve a key path as a boolean
    ///
    /// Strings are matched against `1/true/yes/on/enabled` and
    /// `0/false/no/off/disabled`, case-insensitively.
    pub fn get_boolean(
        &self,
        container: &Container<'_>,
        path: impl Into<KeyPath>,
        default: Option<bool>,
    ) -> Option<bool> {
        self.get_coerced(container, path, "boolean", coerce::to_boolean)
            .or(default)
    }

    /// Resolve a key path as an integer, parsing a leading numeric prefix of strings
    pub fn get_integer(
        &self,
        container: &Container<'_>,
        path: impl Into<KeyPath>,
        default: Option<i64>,
    ) -> Option<i64> {
        self.get_coerced(container, path, "integer", coerce::to_integer)
            .or(default)
    }

    /// Resolve a key path as a float
    ///
    /// Strings must start with a number containing a decimal point; `"5"`
    /// falls back to `default`.
    pub fn get_float(
        &self,
        container: &Container<'_>,
        path: impl Into<KeyPath>,
        default: Option<f64>,
    ) -> Option<f64> {
        self.get_coerced(container, path, "float", coerce::to_float)
            .or(default)
    }

    fn get_coerced<T>(
        &self,
        container: &Container<'_>,
        path: impl Into<KeyPath>,
        expected: &str,
        convert: fn(&Value) -> Option<T>,
    ) -> Option<T> {
        let path = path.into();
        let value = self.fetch(container, &path).ok()?;
        let coerced = convert(&value);
        if coerced.is_none() {
            log::debug!(
                "'{}' in {} is a {} that does not read as {}, using default",
                path,
                container,
                value.type_name(),
                expected
            );
        }
        coerced
    }
}
