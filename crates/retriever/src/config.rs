use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_NUM_RESULTS: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: f64 = gradient::DEFAULT_TIMEOUT_SECS;

pub const ENV_KNOWLEDGE_BASE_ID: &str = "GRADIENT_KB_ID";
pub const ENV_API_TOKEN: &str = "DIGITALOCEAN_ACCESS_TOKEN";
pub const ENV_NUM_RESULTS: &str = "GRADIENT_NUM_RESULTS";
pub const ENV_BASE_URL: &str = "GRADIENT_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "GRADIENT_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieverConfig {
    pub knowledge_base_id: String,
    #[serde(skip_serializing)]
    pub api_token: String,
    pub num_results: u32,
    pub base_url: Option<String>,
    /// Request timeout in seconds, handed to the transport as-is.
    pub timeout: f64,
}

impl fmt::Debug for RetrieverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrieverConfig")
            .field("knowledge_base_id", &self.knowledge_base_id)
            .field("api_token", &"<redacted>")
            .field("num_results", &self.num_results)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("environment variable {name} has invalid value {value:?}")]
pub struct EnvError {
    pub name: &'static str,
    pub value: String,
}

impl RetrieverConfig {
    pub fn new(knowledge_base_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            knowledge_base_id: knowledge_base_id.into(),
            api_token: api_token.into(),
            num_results: DEFAULT_NUM_RESULTS,
            base_url: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_num_results(mut self, num_results: u32) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: f64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the configuration from the process environment.
    ///
    /// Missing credentials are left empty; the retriever rejects them at construction.
    pub fn from_env() -> Result<Self, EnvError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, EnvError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(
            lookup(ENV_KNOWLEDGE_BASE_ID).unwrap_or_default(),
            lookup(ENV_API_TOKEN).unwrap_or_default(),
        );

        if let Some(value) = lookup(ENV_NUM_RESULTS) {
            config.num_results = value.trim().parse().map_err(|_| EnvError {
                name: ENV_NUM_RESULTS,
                value,
            })?;
        }

        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = value.trim().parse().map_err(|_| EnvError {
                name: ENV_TIMEOUT_SECS,
                value,
            })?;
        }

        config.base_url = lookup(ENV_BASE_URL).filter(|url| !url.is_empty());

        Ok(config)
    }

    pub(crate) fn client_options(&self) -> gradient::ClientOptions {
        gradient::ClientOptions {
            model_access_key: self.api_token.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }
}
