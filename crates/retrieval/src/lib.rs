//! # docqa Retrieval
//!
//! Builds an in-memory index from a document set and answers queries with a
//! cleaned, bounded context ready for a generation model.
//!
//! ```text
//! build:  Document[] -> Chunker -> Embedder (batch) -> VectorIndex
//! answer: query -> Embedder -> VectorIndex::search(k)
//!               -> cap each chunk, join with blank lines -> ContextCleaner
//! ```
//!
//! Text extraction ([`TextExtractor`]) and generation ([`Explainer`]) are
//! collaborators supplied by the caller.

mod cleaner;
mod config;
mod error;
mod explain;
mod orchestrator;
mod source;

pub use cleaner::{strip_noise, ContextCleaner, NOISE_SYMBOLS};
pub use config::{
    CleanerConfig, RetrievalConfig, DEFAULT_CHUNK_CHAR_CAP, DEFAULT_MAX_SENTENCES,
    DEFAULT_MIN_SENTENCE_CHARS, DEFAULT_TOP_K,
};
pub use error::{Result, RetrievalError};
pub use explain::{Explainer, ExtractiveExplainer};
pub use orchestrator::{Answer, BuildOutcome, BuildStats, Explanation, RetrievalOrchestrator};
pub use source::{
    DirectorySource, Document, DocumentSource, LoadedDocuments, PlainTextExtractor, TextExtractor,
};
