use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrievalError>;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Chunker error: {0}")]
    ChunkerError(#[from] docqa_text_chunker::ChunkerError),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] docqa_vector_store::VectorStoreError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No usable documents ({} failed: {})", failed.len(), failed.join(", "))]
    NoUsableDocuments { failed: Vec<String> },

    #[error("Empty query")]
    EmptyQuery,

    #[error("Generation error: {0}")]
    GenerationError(String),
}

impl RetrievalError {
    /// Failure reported by an [`crate::Explainer`]
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::GenerationError(msg.into())
    }
}
