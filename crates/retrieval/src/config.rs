use crate::error::{Result, RetrievalError};
use docqa_text_chunker::ChunkerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_CHUNK_CHAR_CAP: usize = 1200;
pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 20;
pub const DEFAULT_MAX_SENTENCES: usize = 20;

/// Sentence filtering thresholds for [`crate::ContextCleaner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// A sentence is kept only if it is longer than this (in chars)
    pub min_sentence_chars: usize,

    /// Upper bound on sentences in the cleaned context
    pub max_sentences: usize,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            min_sentence_chars: DEFAULT_MIN_SENTENCE_CHARS,
            max_sentences: DEFAULT_MAX_SENTENCES,
        }
    }
}

/// Everything the retrieval pipeline can be tuned with.
///
/// ```toml
/// top_k = 10
/// chunk_char_cap = 1200
/// embed_workers = 4
///
/// [chunker]
/// window_size = 500
/// overlap = 50
///
/// [cleaner]
/// max_sentences = 20
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub chunker: ChunkerConfig,

    pub cleaner: CleanerConfig,

    /// Chunks retrieved per query
    pub top_k: usize,

    /// Per-chunk character cap when assembling the context
    pub chunk_char_cap: usize,

    /// Threads used to embed chunks at build time (1 = embed inline)
    pub embed_workers: usize,

    /// Texts handed to the embedder per call when embedding in parallel
    pub embed_slice: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            chunker: ChunkerConfig::default(),
            cleaner: CleanerConfig::default(),
            top_k: DEFAULT_TOP_K,
            chunk_char_cap: DEFAULT_CHUNK_CHAR_CAP,
            embed_workers: 1,
            embed_slice: 64,
        }
    }
}

impl RetrievalConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading retrieval config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.chunker.validate()?;

        if self.chunk_char_cap == 0 {
            return Err(RetrievalError::InvalidConfig(
                "chunk_char_cap must be > 0".to_string(),
            ));
        }

        if self.embed_workers == 0 || self.embed_slice == 0 {
            return Err(RetrievalError::InvalidConfig(
                "embed_workers and embed_slice must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_valid() {
        let config = RetrievalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunker.window_size, 500);
        assert_eq!(config.chunker.overlap, 50);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.chunk_char_cap, 1200);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RetrievalConfig::from_toml_str(
            r#"
top_k = 4

[chunker]
window_size = 200
"#,
        )
        .unwrap();
        assert_eq!(config.top_k, 4);
        assert_eq!(config.chunker.window_size, 200);
        assert_eq!(config.chunker.overlap, 50);
        assert_eq!(config.cleaner, CleanerConfig::default());
    }

    #[test]
    fn test_invalid_window_rejected() {
        let err = RetrievalConfig::from_toml_str("[chunker]\nwindow_size = 40\noverlap = 40\n")
            .unwrap_err();
        assert!(matches!(err, RetrievalError::ChunkerError(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = RetrievalConfig::from_toml_str("top_k = \"many\"").unwrap_err();
        assert!(matches!(err, RetrievalError::ConfigParse(_)));
    }
}
