//! # docqa Text Chunker
//!
//! Splits extracted document text into fixed-size, overlapping word windows
//! ready for embedding.
//!
//! ## Algorithm
//!
//! ```text
//! raw text
//!     │
//!     ├──> normalize (BOM, whitespace runs -> single space)
//!     │
//!     ├──> reject if shorter than `min_text_chars`
//!     │
//!     └──> words[start..start + window_size]
//!          start += window_size - overlap, until start >= N
//! ```
//!
//! Windows are measured in whitespace-separated words, not in the embedding
//! model's tokens. The two diverge, so `window_size` is only an approximation
//! of the token budget a chunk consumes.
//!
//! ## Example
//!
//! ```rust
//! use docqa_text_chunker::chunk;
//!
//! let text = (0..1000).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
//! let chunks = chunk(&text, "paper.pdf", 500, 50).unwrap();
//! assert_eq!(chunks.len(), 3);
//! assert_eq!((chunks[2].start_word, chunks[2].end_word), (900, 1000));
//! ```

mod chunker;
mod config;
mod error;
mod types;

pub use chunker::{chunk, normalize_text, Chunker};
pub use config::{ChunkerConfig, DEFAULT_MIN_TEXT_CHARS, DEFAULT_OVERLAP, DEFAULT_WINDOW_SIZE};
pub use error::{ChunkerError, Result};
pub use types::Chunk;
