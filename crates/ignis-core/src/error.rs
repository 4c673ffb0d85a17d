//! Error types for ignis-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for ignis-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ignis-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A request parameter is missing or malformed.
    #[error("Validation error: {message}")]
    Validation {
        /// Parameter that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// Configuration is missing or invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A requested resource does not exist.
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing resource
        what: String,
    },

    /// I/O error, with the path involved when known.
    #[error("I/O error{}: {source}", path_suffix(.path))]
    Io {
        /// Path being read or written
        path: Option<PathBuf>,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a validation error without a field name.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a validation error for a named request parameter.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Error::NotFound { what: what.into() }
    }

    /// Wraps an I/O error together with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::Io {
            path: Some(path.to_path_buf()),
            source,
        }
    }

    /// Whether the error was caused by the caller (bad input or a missing
    /// resource) rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::NotFound { .. })
    }
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }
}
