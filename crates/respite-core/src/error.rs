//! Core error types for respite-core.
//!
//! A thiserror-based hierarchy. Each storage or integration concern has its
//! own error enum; `CoreError` gathers them for callers that do not care
//! which layer failed.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for respite-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Playback-service authorization errors
    #[error("authorization error: {0}")]
    Auth(#[from] AuthError),

    /// Playback transport errors
    #[error("playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store file
    #[error("failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Store file is locked by another process
    #[error("store is locked")]
    Locked,

    /// A stored value no longer deserializes
    #[error("stored value for '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Authorization errors for the playback service.
///
/// There is no refresh flow: an expired credential is only ever detected by
/// the remote service rejecting it, and recovery is a fresh authorization.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Could not open the authorization page in a browser
    #[error("failed to open the authorization page: {0}")]
    BrowserLaunch(String),

    /// An operation needed a credential and none is held
    #[error("not authorized with the playback service")]
    NotAuthorized,
}

/// Playback transport errors.
///
/// These are contained within the playback controller; they never propagate
/// to the timer or the task list.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// Credential rejected by the remote service
    #[error("access token rejected by the playback service")]
    Unauthorized,

    /// Request-level failure (network unreachable, malformed response)
    #[error("playback request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a status the client does not know
    #[error("unexpected playback response status: {0}")]
    UnexpectedStatus(u16),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
