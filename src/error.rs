//! Error types for dataset loading.

use thiserror::Error;

/// Errors that can occur while loading manifests, descriptor files or configuration.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// I/O error while reading a local file
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path that failed to read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// Document that failed to parse
        path: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Non-success HTTP status
    #[error("HTTP {status} fetching {url}")]
    Http {
        /// Requested URL
        url: String,
        /// Response status code
        status: u16,
    },

    /// Browser-side fetch failure (network error, bad cast, ...)
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Configuration file could not be used
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

impl ViewerError {
    /// Create an I/O error for a path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON error for a document path.
    pub fn json(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Create a fetch error with a message.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Whether this error means the document simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::Http { status, .. } => *status == 404,
            _ => false,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ViewerError>;
