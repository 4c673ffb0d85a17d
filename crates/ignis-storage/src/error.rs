//! Error types for ignis-storage

use thiserror::Error;

/// Result type alias for ignis-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ignis-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from ignis-core
    #[error("Core error: {0}")]
    Core(#[from] ignis_core::Error),

    /// Query, connection, or decode failure reported by sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A parameter could not be encoded for the driver
    #[error("Encode error: {0}")]
    Encode(String),
}

impl Error {
    /// Whether a retry could succeed (connection and pool failures).
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Database(e) => matches!(
                e,
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
            ),
            Error::Core(_) | Error::Encode(_) => false,
        }
    }
}
