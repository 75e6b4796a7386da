use crate::cleaner::ContextCleaner;
use crate::config::RetrievalConfig;
use crate::error::{Result, RetrievalError};
use crate::explain::Explainer;
use crate::source::{Document, DocumentSource};
use docqa_text_chunker::{Chunk, Chunker, ChunkerError};
use docqa_vector_store::{Embedder, ParallelEmbedder, SearchHit, VectorIndex};
use serde::Serialize;

/// Counters describing a finished build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub documents: usize,
    pub indexed_documents: usize,
    pub chunks: usize,
    pub dimension: usize,
}

/// A populated index and the documents that could not contribute to it
#[derive(Debug)]
pub struct BuildOutcome {
    pub index: VectorIndex,
    /// Failed document ids, in input order
    pub failed: Vec<String>,
    pub stats: BuildStats,
}

/// Retrieved chunks and the cleaned context built from them
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub chunks: Vec<SearchHit>,
    pub context: String,
}

impl Answer {
    /// Distinct source ids, best-ranked first
    #[must_use]
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for hit in &self.chunks {
            if !sources.contains(&hit.chunk.source.as_str()) {
                sources.push(&hit.chunk.source);
            }
        }
        sources
    }
}

/// Generated text together with the retrieval it was grounded on
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub answer: String,
    pub retrieval: Answer,
}

/// Wires chunking, embedding, indexing and cleaning into build/answer flows.
///
/// The embedder is borrowed; the orchestrator owns no index. Indexes it builds
/// are returned to the caller and passed back in by reference for queries.
pub struct RetrievalOrchestrator<'a> {
    embedder: &'a dyn Embedder,
    parallel: Option<ParallelEmbedder<&'a dyn Embedder>>,
    chunker: Chunker,
    cleaner: ContextCleaner,
    top_k: usize,
    chunk_char_cap: usize,
}

impl<'a> RetrievalOrchestrator<'a> {
    pub fn new(embedder: &'a dyn Embedder, config: &RetrievalConfig) -> Result<Self> {
        config.validate()?;

        let parallel = if config.embed_workers > 1 {
            Some(ParallelEmbedder::new(
                embedder,
                config.embed_workers,
                config.embed_slice,
            )?)
        } else {
            None
        };

        Ok(Self {
            embedder,
            parallel,
            chunker: Chunker::new(config.chunker)?,
            cleaner: ContextCleaner::new(config.cleaner),
            top_k: config.top_k,
            chunk_char_cap: config.chunk_char_cap,
        })
    }

    /// Default number of chunks retrieved per query
    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    #[must_use]
    pub const fn cleaner(&self) -> &ContextCleaner {
        &self.cleaner
    }

    /// Chunk, embed and index `documents`.
    ///
    /// Documents with too little text are listed in [`BuildOutcome::failed`];
    /// only when none is usable does the build fail.
    pub fn build_index(&self, documents: &[Document]) -> Result<BuildOutcome> {
        self.build(documents, Vec::new())
    }

    /// Load documents from `source` and index them.
    ///
    /// Extraction failures reported by the source are merged into `failed`.
    pub fn build_from_source(&self, source: &dyn DocumentSource) -> Result<BuildOutcome> {
        let loaded = source.load()?;
        self.build(&loaded.documents, loaded.failed)
    }

    fn build(&self, documents: &[Document], mut failed: Vec<String>) -> Result<BuildOutcome> {
        let total_documents = documents.len() + failed.len();
        log::info!("Building index from {} documents", documents.len());

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut indexed_documents = 0;
        for document in documents {
            match self.chunker.chunk_document(&document.raw_text, &document.id) {
                Ok(doc_chunks) if !doc_chunks.is_empty() => {
                    indexed_documents += 1;
                    chunks.extend(doc_chunks);
                }
                Ok(_) => record_failure(&mut failed, &document.id),
                Err(ChunkerError::InsufficientText {
                    document,
                    chars,
                    min,
                }) => {
                    log::warn!("Skipping {document}: {chars} chars of text (minimum {min})");
                    record_failure(&mut failed, &document);
                }
                Err(err) => return Err(err.into()),
            }
        }

        if chunks.is_empty() {
            return Err(RetrievalError::NoUsableDocuments { failed });
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let vectors = match &self.parallel {
            Some(parallel) => parallel.embed_batch(&texts)?,
            None => self.embedder.embed_batch(&texts)?,
        };

        let dimension = vectors.first().map_or(0, Vec::len);
        let mut index = VectorIndex::try_new(dimension)?;
        let chunk_count = chunks.len();
        index.add(vectors, chunks)?;

        let stats = BuildStats {
            documents: total_documents,
            indexed_documents,
            chunks: chunk_count,
            dimension,
        };
        log::info!(
            "Index built: {} chunks from {}/{} documents (dimension {})",
            stats.chunks,
            stats.indexed_documents,
            stats.documents,
            stats.dimension
        );

        Ok(BuildOutcome {
            index,
            failed,
            stats,
        })
    }

    /// Retrieve the `k` closest chunks for `query` and build a cleaned context.
    pub fn answer(&self, index: &VectorIndex, query: &str, k: usize) -> Result<Answer> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RetrievalError::EmptyQuery);
        }

        let query_vector = self.embedder.embed(query)?;
        let hits = index.search(&query_vector, k)?;
        log::debug!("Query '{}' matched {} chunks", query, hits.len());

        let raw_context = hits
            .iter()
            .map(|hit| truncate_chars(&hit.chunk.text, self.chunk_char_cap))
            .collect::<Vec<_>>()
            .join("\n\n");
        let context = self.cleaner.clean(&raw_context);

        Ok(Answer {
            chunks: hits,
            context,
        })
    }

    /// [`RetrievalOrchestrator::answer`], then hand the context to `explainer`.
    pub fn explain(
        &self,
        index: &VectorIndex,
        query: &str,
        k: usize,
        explainer: &dyn Explainer,
    ) -> Result<Explanation> {
        let retrieval = self.answer(index, query, k)?;
        let answer = explainer.explain(&retrieval.context, query.trim())?;
        Ok(Explanation { answer, retrieval })
    }
}

fn record_failure(failed: &mut Vec<String>, id: &str) {
    if !failed.iter().any(|f| f == id) {
        failed.push(id.to_string());
    }
}

/// First `max_chars` characters of `text`, cut on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
