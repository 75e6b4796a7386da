//! # docqa Vector Store
//!
//! Exact nearest-neighbor search over document chunk embeddings.
//!
//! ## Architecture
//!
//! ```text
//! Chunk[]
//!     │
//!     ├──> Embedder (external model, stub, or feature hashing)
//!     │      └─> Vec<f32>[D]
//!     │
//!     └──> VectorIndex
//!            ├─> vector arena  [n * D] f32
//!            └─> chunk arena   [n]      (same positions)
//! ```
//!
//! Both arenas are append-only and grow in lockstep, so adding a second batch
//! never disturbs the chunk associated with an earlier vector. Search is a full
//! scan by squared Euclidean distance.
//!
//! ## Example
//!
//! ```rust
//! use docqa_vector_store::{Chunk, Embedder, StubEmbedder, VectorIndex};
//!
//! let embedder = StubEmbedder::new(8);
//! let chunks = vec![
//!     Chunk::new("alpha".into(), "a.txt".into(), 0, 0, 1),
//!     Chunk::new("beta".into(), "b.txt".into(), 0, 0, 1),
//! ];
//! let vectors = embedder.embed_batch(&["alpha", "beta"]).unwrap();
//!
//! let mut index = VectorIndex::new(embedder.dimension());
//! index.add(vectors, chunks).unwrap();
//!
//! let hits = index.search(&embedder.embed("beta").unwrap(), 1).unwrap();
//! assert_eq!(hits[0].chunk.source, "b.txt");
//! ```

mod embeddings;
mod error;
mod index;
mod shared;
mod types;

pub use embeddings::{ensure_dimension, Embedder, HashingEmbedder, ParallelEmbedder, StubEmbedder};
pub use error::{Result, VectorStoreError};
pub use index::{squared_l2, VectorIndex};
pub use shared::SharedIndex;
pub use types::SearchHit;

// Re-export chunk type for convenience
pub use docqa_text_chunker::Chunk;
