use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_SIZE: usize = 500;
pub const DEFAULT_OVERLAP: usize = 50;
pub const DEFAULT_MIN_TEXT_CHARS: usize = 200;

/// Configuration for word-window chunking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Words per chunk (the last chunk of a source may be shorter)
    pub window_size: usize,

    /// Words shared between neighboring chunks of one source
    pub overlap: usize,

    /// Sources whose normalized text is shorter than this are rejected
    pub min_text_chars: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            overlap: DEFAULT_OVERLAP,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }
}

impl ChunkerConfig {
    /// Config with explicit window parameters and the default text threshold
    #[must_use]
    pub fn with_window(window_size: usize, overlap: usize) -> Self {
        Self {
            window_size,
            overlap,
            ..Default::default()
        }
    }

    /// Words the window start advances between chunks
    #[must_use]
    pub const fn step(&self) -> usize {
        self.window_size.saturating_sub(self.overlap)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(ChunkerError::invalid_config("window_size must be > 0"));
        }

        if self.overlap >= self.window_size {
            return Err(ChunkerError::invalid_config(format!(
                "overlap ({}) must be smaller than window_size ({})",
                self.overlap, self.window_size
            )));
        }

        Ok(())
    }
}
