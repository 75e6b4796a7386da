use clap::ValueEnum;
use docqa_vector_store::{Embedder, HashingEmbedder, StubEmbedder};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum EmbedMode {
    /// Deterministic pseudo-random vectors (no semantic signal)
    Stub,
    /// Hashed bag-of-words vectors
    Lexical,
}

impl EmbedMode {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            EmbedMode::Stub => "stub",
            EmbedMode::Lexical => "lexical",
        }
    }

    pub(crate) fn embedder(self, dimension: usize) -> Box<dyn Embedder> {
        match self {
            EmbedMode::Stub => Box::new(StubEmbedder::new(dimension)),
            EmbedMode::Lexical => Box::new(HashingEmbedder::new(dimension)),
        }
    }
}
