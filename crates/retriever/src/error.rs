#[derive(Debug, thiserror::Error)]
pub enum RetrieverError {
    #[error("knowledge_base_id is required and must be provided")]
    MissingKnowledgeBaseId,

    #[error("api_token is required and must be provided")]
    MissingApiToken,

    /// Anything the transport raised, passed through untouched.
    #[error(transparent)]
    Transport(#[from] gradient::Error),
}

pub type Result<T> = std::result::Result<T, RetrieverError>;
