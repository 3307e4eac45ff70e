//! Environment indirection
//!
//! A stored value of the form `["system", "VAR"]` or
//! `["system", "VAR", default]` stands for the environment variable `VAR`.
//!
//! ```yaml
//! database_url: [system, DATABASE_URL]                  # NotFound when unset
//! pool_size: [system, POOL_SIZE, 10]                    # 10 when unset
//! ```
//!
//! The default is returned as stored; it is never itself resolved. Any value
//! that does not have exactly this shape passes through unchanged.

use crate::env::Env;
use crate::error::{NotFound, Resolution};
use crate::value::Value;

/// Reserved tag marking an environment reference
pub const SYSTEM_MARKER: &str = "system";

/// A parsed environment reference
#[derive(Debug, Clone, PartialEq)]
pub struct EnvReference {
    /// Name of the environment variable
    pub var: String,
    /// Literal used when the variable is unset
    pub default: Option<Value>,
}

impl EnvReference {
    /// Recognize the reference wire format
    pub fn parse(value: &Value) -> Option<Self> {
        let items = value.as_sequence()?;
        let (marker, var, default) = match items {
            [marker, var] => (marker, var, None),
            [marker, var, default] => (marker, var, Some(default.clone())),
            _ => return None,
        };

        if marker.as_str() != Some(SYSTEM_MARKER) {
            return None;
        }

        Some(Self {
            var: var.as_str()?.to_string(),
            default,
        })
    }

    /// Read the variable, falling back to the default
    pub fn resolve(&self, env: &Env) -> Resolution<Value> {
        if let Some(value) = env.var(&self.var) {
            log::trace!("Resolved environment variable {}", self.var);
            return Ok(Value::String(value));
        }

        match &self.default {
            Some(default) => {
                log::debug!(
                    "Environment variable {} is not set, using default",
                    self.var
                );
                Ok(default.clone())
            }
            None => {
                log::debug!("Environment variable {} is not set", self.var);
                Err(NotFound)
            }
        }
    }
}

impl From<EnvReference> for Value {
    fn from(reference: EnvReference) -> Self {
        let mut items = vec![Value::from(SYSTEM_MARKER), Value::String(reference.var)];
        items.extend(reference.default);
        Value::Sequence(items)
    }
}

/// Resolve a raw stored value against the environment
pub fn resolve_indirection(raw: &Value, env: &Env) -> Resolution<Value> {
    match EnvReference::parse(raw) {
        Some(reference) => reference.resolve(env),
        None => Ok(raw.clone()),
    }
}
