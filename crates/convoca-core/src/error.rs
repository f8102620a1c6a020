//! Error types for convoca-core

use thiserror::Error;

use crate::api::ApiError;

/// Result type alias using convoca-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in convoca-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Backend payload did not match any accepted shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation collides with existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// REST backend error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
