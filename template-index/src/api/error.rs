//! API client error types.

use thiserror::Error;

/// Errors that can occur while talking to the hosting service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure (DNS, connection, timeout).
    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Request to '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response wraps its payload under an unexpected property.
    #[error("Expected root element '{expected}', found '{found}'")]
    RootMismatch { expected: String, found: String },

    /// The response object has no properties at all.
    #[error("Response has no root element")]
    MissingRoot,

    /// A single result was requested but the payload holds no object.
    #[error("Response contains no object under '{root}'")]
    MissingObject { root: String },

    /// Malformed or truncated JSON.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body could not be read.
    #[error("Failed to read response from '{url}': {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
