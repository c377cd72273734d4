//! Error types for the Brickline intake client.

/// All errors a transport can report.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Invalid client configuration.
    #[error("brickline config error: {0}")]
    Config(String),

    /// Network or HTTP client error.
    #[error("brickline network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("brickline json error: {0}")]
    Json(#[from] serde_json::Error),
}
