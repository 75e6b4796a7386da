use crate::error::Result;
use crate::index::VectorIndex;
use crate::types::SearchHit;
use docqa_text_chunker::Chunk;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// Thread-safe handle over a [`VectorIndex`].
///
/// Any number of concurrent `search` calls may run; `add` waits for them to
/// finish and blocks new readers until it returns. A panic while holding the
/// lock cannot leave a half-written batch because `add` validates before it
/// mutates, so poisoned locks are recovered rather than propagated.
#[derive(Debug, Clone)]
pub struct SharedIndex {
    inner: Arc<RwLock<VectorIndex>>,
}

impl SharedIndex {
    #[must_use]
    pub fn new(index: VectorIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn add(&self, vectors: Vec<Vec<f32>>, chunks: Vec<Chunk>) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.add(vectors, chunks)
    }

    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        self.read().search(query, k)
    }

    /// Read access for several operations under one lock acquisition
    pub fn read(&self) -> RwLockReadGuard<'_, VectorIndex> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.read().dimension()
    }
}

impl From<VectorIndex> for SharedIndex {
    fn from(index: VectorIndex) -> Self {
        Self::new(index)
    }
}
