//! Blocking flavour of the client. Must not be used from inside an async runtime.

use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{RetrieveBody, RetrieveDocumentsParams, RetrieveResponse};
use crate::{ClientOptions, decode_response};

pub struct Gradient {
    options: ClientOptions,
    client: reqwest::blocking::Client,
}

impl Gradient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(options.timeout_duration()?)
            .build()
            .map_err(Error::Build)?;

        Ok(Self { options, client })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn retrieve(&self) -> Retrieve<'_> {
        Retrieve { gradient: self }
    }
}

pub struct Retrieve<'a> {
    gradient: &'a Gradient,
}

impl Retrieve<'_> {
    pub fn documents(&self, params: &RetrieveDocumentsParams) -> Result<RetrieveResponse> {
        let options = &self.gradient.options;
        let url = options.endpoint(&params.knowledge_base_id);

        debug!(
            knowledge_base_id = %params.knowledge_base_id,
            num_results = params.num_results,
            "Sending blocking retrieve request"
        );

        let response = self
            .gradient
            .client
            .post(&url)
            .bearer_auth(&options.model_access_key)
            .json(&RetrieveBody::from(params))
            .send()?;

        let status = response.status();
        let body = response.text()?;

        decode_response(status, &body)
    }
}
