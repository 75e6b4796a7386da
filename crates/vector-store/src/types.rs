use docqa_text_chunker::Chunk;
use serde::{Deserialize, Serialize};

/// One nearest-neighbor match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub chunk: Chunk,
    /// Squared Euclidean distance to the query
    pub distance: f32,
    /// Insertion ordinal inside the index
    pub position: usize,
}
