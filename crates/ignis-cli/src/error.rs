//! Error types for ignis-cli

use thiserror::Error;

/// Result type alias for ignis-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ignis-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from ignis-core
    #[error("Core error: {0}")]
    Core(#[from] ignis_core::Error),

    /// Error from ignis-storage
    #[error("Storage error: {0}")]
    Storage(#[from] ignis_storage::Error),

    /// Error from ignis-api
    #[error("Server error: {0}")]
    Api(#[from] ignis_api::ApiError),
}
