use crate::error::{Result, VectorStoreError};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// Boundary to whatever model turns text into fixed-dimension vectors.
///
/// Implementations must return one vector per input text, in input order, each
/// of length [`Embedder::dimension`].
pub trait Embedder: Send + Sync {
    fn dimension(&self) -> usize;

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text])?;
        embeddings
            .pop()
            .ok_or_else(|| VectorStoreError::embedding("Empty embedding result"))
    }
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}

impl<E: Embedder + ?Sized> Embedder for Arc<E> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}

/// Deterministic pseudo-random embeddings keyed by the exact text.
///
/// Identical texts map to identical unit vectors; anything else is unrelated.
/// Meant for tests and for running the pipeline without a model.
#[derive(Debug, Clone, Copy)]
pub struct StubEmbedder {
    dimension: usize,
}

impl StubEmbedder {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Embedder for StubEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| stub_embed(text, self.dimension))
            .collect())
    }
}

/// Signed feature hashing over lowercased alphanumeric words.
///
/// Texts sharing vocabulary land close together, which makes retrieval
/// meaningful without an external model.
#[derive(Debug, Clone, Copy)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimension];
        if self.dimension == 0 {
            return vec;
        }
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let hash = fnv1a_64(word.to_lowercase().as_bytes());
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vec[bucket] += sign;
        }
        normalize(&mut vec);
        vec
    }
}

impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

/// Fans a batch out over a worker pool.
///
/// Each worker embeds a disjoint contiguous slice; results are concatenated in
/// the original order, so vector `i` still belongs to text `i`.
pub struct ParallelEmbedder<E> {
    inner: E,
    pool: ThreadPool,
    slice_len: usize,
}

impl<E: Embedder> ParallelEmbedder<E> {
    pub fn new(inner: E, workers: usize, slice_len: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("docqa-embed-{i}"))
            .build()
            .map_err(|e| VectorStoreError::embedding(format!("Failed to start embed pool: {e}")))?;
        Ok(Self {
            inner,
            pool,
            slice_len: slice_len.max(1),
        })
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Embedder> Embedder for ParallelEmbedder<E> {
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.len() <= self.slice_len {
            return self.inner.embed_batch(texts);
        }

        log::debug!(
            "Embedding {} texts in slices of {} on {} workers",
            texts.len(),
            self.slice_len,
            self.workers()
        );

        let slices: Vec<Vec<Vec<f32>>> = self.pool.install(|| {
            texts
                .par_chunks(self.slice_len)
                .map(|slice| {
                    let vectors = self.inner.embed_batch(slice)?;
                    if vectors.len() != slice.len() {
                        return Err(VectorStoreError::embedding(format!(
                            "Embedder returned {} vectors for {} texts",
                            vectors.len(),
                            slice.len()
                        )));
                    }
                    Ok(vectors)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(slices.into_iter().flatten().collect())
    }
}

/// Fail unless `vec` has exactly `expected` components.
pub fn ensure_dimension(vec: &[f32], expected: usize) -> Result<()> {
    if vec.len() != expected {
        return Err(VectorStoreError::InvalidDimension {
            expected,
            actual: vec.len(),
        });
    }
    Ok(())
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

fn stub_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut state =
        fnv1a_64(text.as_bytes()) ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vec = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        let high = (bits >> 32) as u32;
        let mantissa = high >> 9;
        let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
        vec.push(unit.mul_add(2.0, -1.0));
    }
    normalize(&mut vec);
    vec
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::squared_l2;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn stub_is_deterministic_and_unit_length() {
        let embedder = StubEmbedder::new(16);
        let a = embedder.embed("attention is all you need").unwrap();
        let b = embedder.embed("attention is all you need").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        let norm: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert_ne!(a, embedder.embed("long short-term memory").unwrap());
    }

    #[test]
    fn hashing_rewards_shared_vocabulary() {
        let embedder = HashingEmbedder::new(256);
        let query = embedder.embed("gradient descent").unwrap();
        let close = embedder
            .embed("Stochastic gradient descent updates weights")
            .unwrap();
        let far = embedder.embed("Generative adversarial networks").unwrap();
        assert!(squared_l2(&query, &close) < squared_l2(&query, &far));
    }

    #[test]
    fn hashing_ignores_case_and_punctuation() {
        let embedder = HashingEmbedder::new(64);
        assert_eq!(
            embedder.embed("LSTM, memory!").unwrap(),
            embedder.embed("lstm memory").unwrap()
        );
    }

    struct CountingEmbedder {
        calls: AtomicUsize,
    }

    impl Embedder for CountingEmbedder {
        fn dimension(&self) -> usize {
            1
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            texts
                .iter()
                .map(|t| t.parse::<f32>().map(|v| vec![v]))
                .collect::<std::result::Result<Vec<_>, std::num::ParseFloatError>>()
                .map_err(|e| VectorStoreError::embedding(e.to_string()))
        }
    }

    #[test]
    fn parallel_embedding_preserves_order() {
        let inner = CountingEmbedder {
            calls: AtomicUsize::new(0),
        };
        let parallel = ParallelEmbedder::new(inner, 4, 3).unwrap();
        let owned: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let texts: Vec<&str> = owned.iter().map(String::as_str).collect();

        let vectors = parallel.embed_batch(&texts).unwrap();
        let values: Vec<f32> = vectors.into_iter().map(|v| v[0]).collect();
        assert_eq!(values, (0..20).map(|i| i as f32).collect::<Vec<_>>());
        assert_eq!(parallel.into_inner().calls.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn parallel_embedding_surfaces_worker_errors() {
        let inner = CountingEmbedder {
            calls: AtomicUsize::new(0),
        };
        let parallel = ParallelEmbedder::new(inner, 2, 1).unwrap();
        assert!(parallel.embed_batch(&["1", "oops", "3"]).is_err());
    }

    #[test]
    fn boxed_embedder_delegates() {
        let boxed: Box<dyn Embedder> = Box::new(StubEmbedder::new(8));
        assert_eq!(boxed.dimension(), 8);
        assert_eq!(boxed.embed("x").unwrap().len(), 8);
    }

    #[test]
    fn ensure_dimension_checks_length() {
        assert!(ensure_dimension(&[0.0; 3], 3).is_ok());
        assert!(ensure_dimension(&[0.0; 2], 3).is_err());
    }
}
