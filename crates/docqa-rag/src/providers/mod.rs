//! Provider abstractions for embeddings and answer generation
//!
//! The pipeline only sees these traits, so backends can be swapped (or faked
//! in tests) without touching chunking, retrieval or prompt assembly.

pub mod embedding;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use llm::{ChatCompletion, LlmProvider};
pub use ollama::OllamaEmbedder;
