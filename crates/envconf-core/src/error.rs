//! Error types for envconf
//!
//! Two kinds of negative outcome exist. [`NotFound`] is the ordinary
//! "nothing there" result threaded through lookups and accessors; it is not
//! exceptional. [`Error`] is reserved for the few fatal conditions: a required
//! key that could not be resolved, or a binding with no namespace.

use std::fmt;

/// Result type alias for envconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a lookup or indirection step
pub type Resolution<T> = std::result::Result<T, NotFound>;

/// The key, an intermediate container, or an environment variable was absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not found")]
pub struct NotFound;

/// Main error type for envconf operations
#[derive(Debug, Clone)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Key path involved in the error (e.g., "database.url")
    pub path: Option<String>,
    /// Actionable help message
    pub help: Option<String>,
    /// Underlying cause (as string for Clone compatibility)
    pub cause: Option<String>,
}

/// Categories of errors that can occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required key resolved to nothing
    ConfigurationMissing {
        /// Namespace or container the key was looked up in
        container: String,
    },
    /// A binding was requested without a usable namespace
    BindingUndetermined,
    /// Malformed input (key path or inline value)
    Parse,
}

impl Error {
    /// Create a configuration missing error
    pub fn configuration_missing(container: impl Into<String>, path: impl Into<String>) -> Self {
        let container = container.into();
        let path = path.into();
        Self {
            help: Some(format!(
                "Set '{}' in {} or point it at an environment variable with [system, VAR, default]",
                path, container
            )),
            kind: ErrorKind::ConfigurationMissing { container },
            path: Some(path),
            cause: None,
        }
    }

    /// Create a binding undetermined error
    pub fn binding_undetermined(reason: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::BindingUndetermined,
            path: None,
            help: Some("Pass a namespace to AppConfig::builder().namespace(..)".into()),
            cause: Some(reason.into()),
        }
    }

    /// Create a new parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            path: None,
            help: None,
            cause: Some(message.into()),
        }
    }

    /// Add path context to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add help message to the error
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::ConfigurationMissing { container } => {
                write!(f, "Configuration missing in {}", container)?
            }
            ErrorKind::BindingUndetermined => write!(f, "Cannot determine namespace to bind")?,
            ErrorKind::Parse => write!(f, "Parse error")?,
        }

        if let Some(path) = &self.path {
            write!(f, "\n  Path: {}", path)?;
        }

        if let Some(cause) = &self.cause {
            write!(f, "\n  {}", cause)?;
        }

        if let Some(help) = &self.help {
            write!(f, "\n  Help: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}
