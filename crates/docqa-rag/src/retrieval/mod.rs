//! Cosine-similarity retrieval over a document's chunk vectors

mod search;

pub use search::{cosine_similarity, retrieve, ScoredChunk, DEFAULT_TOP_K, MIN_SCORE};
