use crate::domain::PipelineSchema;
use crate::form::SchemaKey;

/// Resolves a pipeline's declared inputs.
#[async_trait::async_trait]
pub trait PipelineLookup: Send + Sync {
    async fn get_pipeline(&self, name: &str, namespace: &str)
    -> Result<PipelineSchema, LookupError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Pipeline {name} not found")]
    NotFound { name: String, namespace: String },
    #[error("failed to load pipeline: {0}")]
    Transport(String),
}

/// One issued schema lookup. Only the most recent request may bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRequest {
    pub generation: u64,
    pub key: SchemaKey,
}
