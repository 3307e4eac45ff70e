//! envconf-core: typed configuration accessors with environment indirection
//!
//! Keys are looked up in a container (a namespace of the process-wide
//! [`ConfigStore`], a mapping, or ordered pairs). A stored value of the form
//! `[system, VAR]` or `[system, VAR, default]` is replaced by the environment
//! variable `VAR`. Typed accessors then coerce the result permissively and
//! fall back to a caller default on any failure.
//!
//! # Example
//!
//! ```rust
//! use envconf_core::{Container, Value};
//!
//! let settings: Value = serde_yaml::from_str(r#"
//! server:
//!   port: [system, DOC_EXAMPLE_PORT, "8080"]
//!   debug: "off"
//! "#).unwrap();
//! let container = Container::from_value(&settings).unwrap();
//!
//! assert_eq!(envconf_core::get_integer(&container, ["server", "port"], None), Some(8080));
//! assert_eq!(envconf_core::get_boolean(&container, ["server", "debug"], Some(true)), Some(false));
//! ```

pub mod binding;
pub mod coerce;
pub mod container;
pub mod env;
pub mod error;
pub mod indirection;
pub mod path;
pub mod resolver;
pub mod store;
pub mod value;

pub use binding::{AppConfig, AppConfigBuilder};
pub use container::Container;
pub use env::Env;
pub use error::{Error, ErrorKind, NotFound, Resolution, Result};
pub use indirection::{EnvReference, SYSTEM_MARKER};
pub use path::KeyPath;
pub use resolver::Resolver;
pub use store::ConfigStore;
pub use value::Value;

/// Look up and resolve a key path using the process environment
pub fn fetch(container: &Container<'_>, path: impl Into<KeyPath>) -> Resolution<Value> {
    Resolver::new().fetch(container, path)
}

/// Like [`fetch`], but a missing value is a [`ErrorKind::ConfigurationMissing`] error
pub fn fetch_or_raise(container: &Container<'_>, path: impl Into<KeyPath>) -> Result<Value> {
    Resolver::new().fetch_or_raise(container, path)
}

/// Resolve a key path, returning `default` when nothing is found
pub fn get(container: &Container<'_>, path: impl Into<KeyPath>, default: impl Into<Value>) -> Value {
    Resolver::new().get(container, path, default)
}

/// Resolve a key path as a boolean
pub fn get_boolean(
    container: &Container<'_>,
    path: impl Into<KeyPath>,
    default: Option<bool>,
) -> Option<bool> {
    Resolver::new().get_boolean(container, path, default)
}

/// Resolve a key path as an integer
pub fn get_integer(
    container: &Container<'_>,
    path: impl Into<KeyPath>,
    default: Option<i64>,
) -> Option<i64> {
    Resolver::new().get_integer(container, path, default)
}

/// Resolve a key path as a float
pub fn get_float(
    container: &Container<'_>,
    path: impl Into<KeyPath>,
    default: Option<f64>,
) -> Option<f64> {
    Resolver::new().get_float(container, path, default)
}

/// Resolve a raw value against the process environment
pub fn resolve_indirection(raw: &Value) -> Resolution<Value> {
    Resolver::new().resolve_indirection(raw)
}
