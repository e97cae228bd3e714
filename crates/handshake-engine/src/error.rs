//! Error types for the handshake engine.

use thiserror::Error;

/// Error type for handshake operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The backend refused to trade the access token for a session token
    #[error("Failed to exchange access token for a session token ({status})")]
    Exchange { status: reqwest::StatusCode },

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] session_storage::StorageError),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL construction or parsing error
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Host navigation error
    #[error("Navigation error: {0}")]
    Navigation(String),
}

/// Result type for handshake operations.
pub type AuthResult<T> = Result<T, AuthError>;
