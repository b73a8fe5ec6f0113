//! Error types with clear, actionable messages

use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the metadata provider
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No API key is configured, so no request was sent
    #[error("TMDB API key is not configured.\n\nSet the {env} environment variable to your TMDB API key and try again.")]
    MissingApiKey { env: String },

    /// The request could not be sent or the connection failed
    #[error("Failed to reach the movie database at {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status
    #[error("Movie database returned HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// The response body did not match the expected shape
    #[error("Failed to decode movie database response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The configured API root does not form a valid URL
    #[error("Invalid movie database URL {url}")]
    InvalidUrl { url: String },

    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },
}

impl CatalogError {
    /// Whether this error means configuration is missing rather than a transient failure
    pub fn is_configuration(&self) -> bool {
        matches!(self, CatalogError::MissingApiKey { .. })
    }
}

/// Failures writing the favorites file
///
/// Reads never fail; see [`crate::favorites::StorageRead`].
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to write favorites to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize favorites")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    /// Writes are switched off (session-only storage)
    #[error("Favorites storage is unavailable: {0}")]
    Unavailable(String),
}

/// Failures resolving configuration directories
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine {0} directory")]
    NoDirectory(&'static str),
}
