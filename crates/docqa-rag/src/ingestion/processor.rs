//! Ingestion pipeline orchestration

use std::sync::Arc;

use uuid::Uuid;

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::types::IndexedDocument;

use super::chunker::TextChunker;
use super::parser::FileParser;

/// Extract, chunk and embed one document
pub struct IngestPipeline {
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    pub fn new(chunking: &ChunkingConfig, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            chunker: TextChunker::from_config(chunking),
            embedder,
        }
    }

    /// Full ingestion from uploaded bytes: parse + index
    pub async fn ingest_file(&self, id: Uuid, filename: &str, data: &[u8]) -> Result<IndexedDocument> {
        let extracted = FileParser::parse(filename, data)?;
        tracing::info!(
            "Extracted {} chars from '{}' ({:?})",
            extracted.content.len(),
            filename,
            extracted.file_type
        );
        self.index(id, filename, extracted.content).await
    }

    /// Chunk and embed already extracted text
    pub async fn index(&self, id: Uuid, filename: &str, raw_text: String) -> Result<IndexedDocument> {
        let chunks = self.chunker.chunk(&raw_text);
        if chunks.is_empty() {
            return Err(Error::ingestion(format!(
                "no usable text found in '{}'",
                filename
            )));
        }

        tracing::info!("Embedding {} chunks with {}", chunks.len(), self.embedder.name());

        let vectors = self
            .embedder
            .embed_batch(&chunks)
            .await
            .map_err(|e| Error::ingestion(format!("embedding failed: {}", e)))?;

        IndexedDocument::new(id, filename, raw_text, chunks, vectors)
    }
}
