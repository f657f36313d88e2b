use thiserror::Error;

/// Errors returned by the Parcelvoy client.
///
/// A non-2xx HTTP status is not an error: the response body is handed back
/// to the caller as-is.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected client options (API key).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The endpoint URL cannot be used as a base for API paths.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The payload could not be serialized to JSON.
    #[error("failed to serialize payload: {0}")]
    Serialize(#[source] serde_json::Error),

    /// DNS, connection or timeout failure in the HTTP transport.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Reading the response body failed.
    #[error("failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    /// The response body is not the JSON the caller asked for.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Result type for Parcelvoy operations.
pub type Result<T> = std::result::Result<T, Error>;
