/// Errors raised by the Gradient transport layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured timeout cannot be expressed as a duration.
    #[error("invalid timeout: {0} seconds")]
    InvalidTimeout(f64),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Network failure, timeout, or an unreadable response body.
    #[error("retrieve request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status (auth rejection included).
    #[error("knowledge base request failed with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode retrieve response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
