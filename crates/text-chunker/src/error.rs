use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur while chunking a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkerError {
    /// Window/overlap parameters that would never make progress
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Extracted text is too short to be worth indexing
    #[error("Insufficient text in '{document}': {chars} chars (minimum {min})")]
    InsufficientText {
        document: String,
        chars: usize,
        min: usize,
    },
}

impl ChunkerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Source identifier for per-document failures
    #[must_use]
    pub fn failed_source(&self) -> Option<&str> {
        match self {
            Self::InsufficientText { document, .. } => Some(document),
            Self::InvalidConfig(_) => None,
        }
    }
}
