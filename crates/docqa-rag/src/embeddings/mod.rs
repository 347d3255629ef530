//! In-process embedding backends

#[cfg(feature = "onnx")]
mod onnx_embedder;

#[cfg(feature = "onnx")]
pub use onnx_embedder::OnnxEmbedder;

use std::sync::Arc;

use crate::config::{EmbeddingBackend, EmbeddingConfig};
use crate::error::Result;
use crate::providers::{EmbeddingProvider, OllamaEmbedder};

/// Build the embedding provider selected by configuration
pub async fn from_config(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    match config.backend {
        EmbeddingBackend::Ollama => Ok(Arc::new(OllamaEmbedder::new(config)?)),
        #[cfg(feature = "onnx")]
        EmbeddingBackend::Onnx => Ok(Arc::new(OnnxEmbedder::new(config).await?)),
        #[cfg(not(feature = "onnx"))]
        EmbeddingBackend::Onnx => Err(crate::error::Error::Config(
            "embeddings.backend = \"onnx\" requires building with the `onnx` feature".into(),
        )),
    }
}
