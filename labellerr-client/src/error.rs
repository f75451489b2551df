//! Error types for the Labellerr client

use labellerr_core::ValidationError;
use labellerr_core::registry::RegistryError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Labellerr client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Request payload failed pre-flight validation
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The platform reported a data type this SDK does not handle
    #[error(transparent)]
    Unsupported(#[from] RegistryError),

    /// Reading a local file failed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Client configuration is incomplete or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Check if the request never reached the platform or got no response
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }

    /// Check if repeating the same request may succeed
    ///
    /// Covers rate limiting, gateway and availability errors, and requests
    /// that could not connect or timed out.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ApiError { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::RequestFailed(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
