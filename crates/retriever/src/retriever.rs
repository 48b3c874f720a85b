use gradient::{Gradient, RetrieveDocumentsParams};

use crate::config::RetrieverConfig;
use crate::error::{Result, RetrieverError};
use crate::normalizer::convert_to_nodes;
use crate::schema::{NodeWithScore, QueryBundle};

/// Retriever backed by a DigitalOcean Gradient knowledge base.
///
/// Configuration is fixed at construction. Every call builds its own transport
/// client, so one instance can serve concurrent calls without coordination.
#[derive(Debug, Clone)]
pub struct GradientKbRetriever {
    config: RetrieverConfig,
}

impl GradientKbRetriever {
    pub fn new(config: RetrieverConfig) -> Result<Self> {
        if config.knowledge_base_id.is_empty() {
            return Err(RetrieverError::MissingKnowledgeBaseId);
        }
        if config.api_token.is_empty() {
            return Err(RetrieverError::MissingApiToken);
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    pub fn client(&self) -> Result<gradient::blocking::Gradient> {
        Ok(gradient::blocking::Gradient::new(self.config.client_options())?)
    }

    pub fn async_client(&self) -> Result<Gradient> {
        Ok(Gradient::new(self.config.client_options())?)
    }

    /// Blocking retrieval. Do not call from inside an async runtime.
    pub fn retrieve(&self, query: impl Into<QueryBundle>) -> Result<Vec<NodeWithScore>> {
        let params = self.params(query.into());
        let response = self.client()?.retrieve().documents(&params)?;

        Ok(convert_to_nodes(&response))
    }

    pub async fn retrieve_async(&self, query: impl Into<QueryBundle>) -> Result<Vec<NodeWithScore>> {
        let params = self.params(query.into());
        let response = self.async_client()?.retrieve().documents(&params).await?;

        Ok(convert_to_nodes(&response))
    }

    fn params(&self, query: QueryBundle) -> RetrieveDocumentsParams {
        RetrieveDocumentsParams {
            knowledge_base_id: self.config.knowledge_base_id.clone(),
            num_results: self.config.num_results,
            query: query.query_str,
        }
    }
}
