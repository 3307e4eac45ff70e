//! Namespace-bound accessors
//!
//! [`AppConfig`] fixes the namespace once so call sites only name keys:
//!
//! ```rust
//! use envconf_core::{AppConfig, ConfigStore};
//!
//! ConfigStore::global().put("doc_billing", "retries", "3");
//!
//! let config = AppConfig::bind("doc_billing").unwrap();
//! assert_eq!(config.get_integer("retries", None), Some(3));
//! ```

use crate::container::Container;
use crate::env::Env;
use crate::error::{Error, Resolution, Result};
use crate::path::KeyPath;
use crate::resolver::Resolver;
use crate::store::ConfigStore;
use crate::value::Value;

/// Accessors bound to one namespace of a configuration store
#[derive(Debug, Clone)]
pub struct AppConfig {
    namespace: String,
    store: &'static ConfigStore,
    resolver: Resolver,
}

/// Builder for [`AppConfig`]
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    namespace: Option<String>,
    store: Option<&'static ConfigStore>,
    env: Option<Env>,
}

impl AppConfigBuilder {
    /// Set the namespace to bind to
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Read from a specific store instead of the process-wide one
    pub fn store(mut self, store: &'static ConfigStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Resolve environment references against a specific source
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    /// Build the binding
    ///
    /// Fails when no namespace was given or the namespace is blank.
    pub fn build(self) -> Result<AppConfig> {
        let namespace = self
            .namespace
            .ok_or_else(|| Error::binding_undetermined("no namespace was given"))?;
        if namespace.trim().is_empty() {
            return Err(Error::binding_undetermined("namespace is blank"));
        }

        Ok(AppConfig {
            namespace,
            store: self.store.unwrap_or_else(ConfigStore::global),
            resolver: Resolver::with_env(self.env.unwrap_or_default()),
        })
    }
}

impl AppConfig {
    /// Start building a binding
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Bind to a namespace of the process-wide store
    pub fn bind(namespace: impl Into<String>) -> Result<Self> {
        Self::builder().namespace(namespace).build()
    }

    /// The bound namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn container(&self) -> Container<'_> {
        Container::in_store(self.store, &self.namespace)
    }

    /// Look up and resolve a key in the bound namespace
    pub fn fetch(&self, path: impl Into<KeyPath>) -> Resolution<Value> {
        self.resolver.fetch(&self.container(), path)
    }

    /// Like [`fetch`](Self::fetch), but a missing value is a `ConfigurationMissing` error
    pub fn fetch_or_raise(&self, path: impl Into<KeyPath>) -> Result<Value> {
        self.resolver.fetch_or_raise(&self.container(), path)
    }

    /// Resolve a key, returning `default` when nothing is found
    pub fn get(&self, path: impl Into<KeyPath>, default: impl Into<Value>) -> Value {
        self.resolver.get(&self.container(), path, default)
    }

    /// Resolve a key as a boolean
    pub fn get_boolean(&self, path: impl Into<KeyPath>, default: Option<bool>) -> Option<bool> {
        self.resolver.get_boolean(&self.container(), path, default)
    }

    /// Resolve a key as an integer
    pub fn get_integer(&self, path: impl Into<KeyPath>, default: Option<i64>) -> Option<i64> {
        self.resolver.get_integer(&self.container(), path, default)
    }

    /// Resolve a key as a float
    pub fn get_float(&self, path: impl Into<KeyPath>, default: Option<f64>) -> Option<f64> {
        self.resolver.get_float(&self.container(), path, default)
    }

    /// Resolve a raw value against this binding's environment source
    pub fn resolve_indirection(&self, raw: &Value) -> Resolution<Value> {
        self.resolver.resolve_indirection(raw)
    }
}
