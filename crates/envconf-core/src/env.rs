//! Environment variable source
//!
//! Production code uses [`Env::real()`], which delegates to [`std::env::var`].
//! [`Env::from_vars()`] supplies a fixed table instead, so lookups can be
//! exercised without touching the process environment.

use std::collections::HashMap;

/// Environment variable reader
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs
    pub fn from_vars(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up a variable. Unset and non-UTF-8 values both read as `None`.
    pub fn var(&self, name: &str) -> Option<String> {
        match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_env_reads_cargo_manifest_dir() {
        assert!(Env::real().var("CARGO_MANIFEST_DIR").is_some());
    }

    #[test]
    fn test_from_vars_returns_set_values() {
        let env = Env::from_vars([("FOO", "bar"), ("BAZ", "")]);
        assert_eq!(env.var("FOO").as_deref(), Some("bar"));
        assert_eq!(env.var("BAZ").as_deref(), Some(""));
    }

    #[test]
    fn test_from_vars_hides_process_env() {
        let env = Env::from_vars(Vec::<(&str, &str)>::new());
        assert_eq!(env.var("CARGO_MANIFEST_DIR"), None);
    }

    #[test]
    fn test_default_is_real() {
        assert!(Env::default().var("CARGO_MANIFEST_DIR").is_some());
    }
}
