use crate::embeddings::ensure_dimension;
use crate::error::{Result, VectorStoreError};
use crate::types::SearchHit;
use docqa_text_chunker::Chunk;
use std::cmp::Ordering;

/// Exact (brute-force) L2 index over an append-only arena of vectors.
///
/// `vectors` stores entry `i` at `[i * dimension, (i + 1) * dimension)` and
/// `chunks[i]` is its metadata; both grow together and never shrink.
///
/// Every query scans all stored vectors, O(n·D). That is fine up to the low
/// tens of thousands of chunks; past that an ANN structure is needed.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimension: usize,
    vectors: Vec<f32>,
    chunks: Vec<Chunk>,
}

impl VectorIndex {
    /// Create an empty index for vectors of exactly `dimension` components.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero; use [`VectorIndex::try_new`] for untrusted input.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "vector index dimension must be > 0");
        Self {
            dimension,
            vectors: Vec::new(),
            chunks: Vec::new(),
        }
    }

    pub fn try_new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(VectorStoreError::InvalidDimension {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self::new(dimension))
    }

    /// Append vectors and their chunks.
    ///
    /// The whole batch is validated first, so a failed call leaves the index
    /// exactly as it was. Repeated calls keep every earlier association intact.
    pub fn add(&mut self, vectors: Vec<Vec<f32>>, chunks: Vec<Chunk>) -> Result<()> {
        if vectors.len() != chunks.len() {
            return Err(VectorStoreError::LengthMismatch {
                vectors: vectors.len(),
                chunks: chunks.len(),
            });
        }
        for vector in &vectors {
            ensure_dimension(vector, self.dimension)?;
        }

        self.vectors.reserve(vectors.len() * self.dimension);
        self.chunks.reserve(chunks.len());
        for (vector, chunk) in vectors.into_iter().zip(chunks) {
            self.vectors.extend_from_slice(&vector);
            self.chunks.push(chunk);
        }

        log::debug!("Index now holds {} vectors", self.chunks.len());
        Ok(())
    }

    /// Return the `k` stored chunks closest to `query`, best first.
    ///
    /// `k` is clamped to the number of stored vectors; ties go to the earlier
    /// insertion. An empty index yields an empty result.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        ensure_dimension(query, self.dimension)?;

        let k = k.min(self.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f32, usize)> = self
            .vectors
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(position, stored)| (squared_l2(query, stored), position))
            .collect();

        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, rank);
            scored.truncate(k);
        }
        scored.sort_unstable_by(rank);

        Ok(scored
            .into_iter()
            .map(|(distance, position)| SearchHit {
                chunk: self.chunks[position].clone(),
                distance,
                position,
            })
            .collect())
    }

    /// Like [`VectorIndex::search`] but returns only the chunks.
    pub fn search_chunks(&self, query: &[f32], k: usize) -> Result<Vec<Chunk>> {
        Ok(self
            .search(query, k)?
            .into_iter()
            .map(|hit| hit.chunk)
            .collect())
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk and vector stored at insertion ordinal `position`
    #[must_use]
    pub fn get(&self, position: usize) -> Option<(&Chunk, &[f32])> {
        let chunk = self.chunks.get(position)?;
        let start = position * self.dimension;
        Some((chunk, &self.vectors[start..start + self.dimension]))
    }
}

/// Squared Euclidean distance, computed in `f32`.
#[must_use]
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

// Ascending distance, NaN last, then insertion order.
fn rank(a: &(f32, usize), b: &(f32, usize)) -> Ordering {
    a.0.is_nan()
        .cmp(&b.0.is_nan())
        .then_with(|| a.0.total_cmp(&b.0))
        .then_with(|| a.1.cmp(&b.1))
}
