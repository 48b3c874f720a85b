use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{RetrieveBody, RetrieveDocumentsParams, RetrieveResponse};
use crate::{ClientOptions, decode_response};

/// Async Gradient client.
#[derive(Clone)]
pub struct Gradient {
    options: ClientOptions,
    client: reqwest::Client,
}

impl Gradient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout_duration()?)
            .build()
            .map_err(Error::Build)?;

        Ok(Self { options, client })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Knowledge-base retrieval resource.
    pub fn retrieve(&self) -> Retrieve<'_> {
        Retrieve { gradient: self }
    }
}

pub struct Retrieve<'a> {
    gradient: &'a Gradient,
}

impl Retrieve<'_> {
    /// Query a knowledge base for the chunks most relevant to `params.query`.
    pub async fn documents(&self, params: &RetrieveDocumentsParams) -> Result<RetrieveResponse> {
        let options = &self.gradient.options;
        let url = options.endpoint(&params.knowledge_base_id);

        debug!(
            knowledge_base_id = %params.knowledge_base_id,
            num_results = params.num_results,
            "Sending retrieve request"
        );

        let response = self
            .gradient
            .client
            .post(&url)
            .bearer_auth(&options.model_access_key)
            .json(&RetrieveBody::from(params))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        decode_response(status, &body)
    }
}
