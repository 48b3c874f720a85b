//! Minimal client for the DigitalOcean Gradient knowledge-base retrieval API.
//!
//! Only the `retrieve.documents` call is implemented. [`Gradient`] is the
//! async client, [`blocking::Gradient`] blocks the calling thread.

pub mod blocking;
pub mod client;
pub mod error;
pub mod schema;

pub use client::{Gradient, Retrieve};
pub use error::{Error, Result};
pub use schema::{RawResult, RetrieveDocumentsParams, RetrieveResponse};

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://kbaas.do-ai.run/v1";
pub const DEFAULT_TIMEOUT_SECS: f64 = 60.0;

/// Settings shared by the async and blocking clients.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    pub model_access_key: String,
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout: f64,
}

impl ClientOptions {
    pub fn new(model_access_key: impl Into<String>) -> Self {
        Self {
            model_access_key: model_access_key.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub(crate) fn timeout_duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.timeout).map_err(|_| Error::InvalidTimeout(self.timeout))
    }

    pub(crate) fn endpoint(&self, knowledge_base_id: &str) -> String {
        format!(
            "{}/{}/retrieve",
            self.base_url().trim_end_matches('/'),
            knowledge_base_id
        )
    }
}

/// Shared tail of both clients: map the status, then decode the body.
pub(crate) fn decode_response(status: reqwest::StatusCode, body: &str) -> Result<RetrieveResponse> {
    if !status.is_success() {
        tracing::debug!(status = %status, "Retrieve request rejected");
        return Err(Error::Status {
            status,
            body: body.to_string(),
        });
    }

    let response: RetrieveResponse = serde_json::from_str(body)?;
    tracing::debug!(
        status = %status,
        results = response.result_count(),
        "Retrieve response received"
    );
    Ok(response)
}
