use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::types::Chunk;

/// Main chunker interface for splitting documents into word windows
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }
}

impl Chunker {
    /// Create a new chunker, rejecting configurations that cannot make progress
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Chunk already-normalized text into overlapping windows.
    ///
    /// Empty text yields no chunks.
    #[must_use]
    pub fn chunk_str(&self, text: &str, source: &str) -> Vec<Chunk> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let window = self.config.window_size;
        let step = self.config.step();

        let mut chunks = Vec::with_capacity(words.len().div_ceil(step));
        let mut start = 0;
        while start < words.len() {
            let end = (start + window).min(words.len());
            chunks.push(Chunk::new(
                words[start..end].join(" "),
                source.to_string(),
                chunks.len(),
                start,
                end,
            ));
            start += step;
        }

        log::debug!(
            "Chunked '{}': {} words -> {} chunks",
            source,
            words.len(),
            chunks.len()
        );
        chunks
    }

    /// Normalize raw extracted text and chunk it.
    ///
    /// Sources shorter than `min_text_chars` after normalization are reported
    /// as [`ChunkerError::InsufficientText`] so callers can record them as failed.
    pub fn chunk_document(&self, raw: &str, source: &str) -> Result<Vec<Chunk>> {
        let text = normalize_text(raw);
        let chars = text.chars().count();
        if chars < self.config.min_text_chars {
            return Err(ChunkerError::InsufficientText {
                document: source.to_string(),
                chars,
                min: self.config.min_text_chars,
            });
        }
        Ok(self.chunk_str(&text, source))
    }
}

/// Chunk `text` with explicit window parameters.
pub fn chunk(text: &str, source: &str, window_size: usize, overlap: usize) -> Result<Vec<Chunk>> {
    let chunker = Chunker::new(ChunkerConfig::with_window(window_size, overlap))?;
    Ok(chunker.chunk_str(text, source))
}

/// Collapse every whitespace run (newlines, tabs, NBSP) into one space and trim.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    let raw = raw.strip_prefix('\u{FEFF}').unwrap_or(raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
