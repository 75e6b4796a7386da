use serde::{Deserialize, Serialize};

/// A contiguous word window of one source document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Window text: the source's words `[start_word, end_word)` joined by single spaces
    pub text: String,

    /// Origin document identifier
    pub source: String,

    /// Ordinal of this chunk within its source
    pub index: usize,

    /// First word (0-indexed, inclusive)
    pub start_word: usize,

    /// Last word (exclusive)
    pub end_word: usize,
}

impl Chunk {
    /// Create a new chunk
    #[must_use]
    pub const fn new(
        text: String,
        source: String,
        index: usize,
        start_word: usize,
        end_word: usize,
    ) -> Self {
        Self {
            text,
            source,
            index,
            start_word,
            end_word,
        }
    }

    /// Number of words in this chunk
    #[must_use]
    pub const fn word_count(&self) -> usize {
        self.end_word.saturating_sub(self.start_word)
    }

    /// Stable identifier, `source:start_word:end_word`
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.source, self.start_word, self.end_word)
    }
}
