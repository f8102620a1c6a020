use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] convoca_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Collection ID cannot be empty")]
    EmptyCollectionId,
    #[error("Failed to read {path}: {message}")]
    Input { path: String, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "API is not configured. Run `convoca config init --api-base-url <URL>` or set CONVOCA_API_URL."
    )]
    ApiNotConfigured,
}

impl CliError {
    /// Message shown to the user; API failures use the localized text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Core(convoca_core::Error::Api(error)) => error.user_message(),
            other => other.to_string(),
        }
    }
}
