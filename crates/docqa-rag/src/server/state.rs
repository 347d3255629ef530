//! Application state for the document Q&A server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::embeddings;
use crate::error::Result;
use crate::generation::{AnswerSynthesizer, ChatCompletionsClient, CredentialStore};
use crate::ingestion::IngestPipeline;
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::storage::{DocumentStore, InMemoryDocumentStore, UploadDirectory};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Indexed documents by id
    documents: Arc<dyn DocumentStore>,
    /// Embedding provider, used for both chunks and questions
    embedder: Arc<dyn EmbeddingProvider>,
    /// Extract, chunk, embed
    pipeline: IngestPipeline,
    /// Language-model call
    synthesizer: AnswerSynthesizer,
    /// Process-wide default API key
    credentials: Arc<CredentialStore>,
    /// Raw upload storage
    uploads: UploadDirectory,
}

impl AppState {
    /// Create application state with the configured production providers
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let embedder = embeddings::from_config(&config.embeddings).await?;
        tracing::info!(
            "Embedding provider: {} ({} dimensions)",
            embedder.name(),
            embedder.dimensions()
        );
        match embedder.health_check().await {
            Ok(true) => tracing::info!("Embedding provider is reachable"),
            _ => tracing::warn!(
                "Embedding provider {} is not reachable at {}; uploads will fail until it is",
                embedder.name(),
                config.embeddings.base_url
            ),
        }

        let llm: Arc<dyn LlmProvider> = Arc::new(ChatCompletionsClient::new(&config.llm)?);
        tracing::info!("LLM provider: {} ({})", llm.name(), llm.model());

        Self::with_providers(config, embedder, llm)
    }

    /// Create application state around explicit providers
    pub fn with_providers(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        let credentials = Arc::new(CredentialStore::new(config.llm.api_key.clone()));
        if !credentials.is_configured() {
            tracing::warn!("No default API key configured; questions need a per-request key");
        }

        let uploads = UploadDirectory::new(&config.storage.upload_dir)?;
        let pipeline = IngestPipeline::new(&config.chunking, Arc::clone(&embedder));
        let synthesizer = AnswerSynthesizer::new(llm, Arc::clone(&credentials), &config.llm);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                documents: Arc::new(InMemoryDocumentStore::new()),
                embedder,
                pipeline,
                synthesizer,
                credentials,
                uploads,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get document store
    pub fn documents(&self) -> &Arc<dyn DocumentStore> {
        &self.inner.documents
    }

    /// Get embedding provider
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedder
    }

    /// Get ingestion pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Get answer synthesizer
    pub fn synthesizer(&self) -> &AnswerSynthesizer {
        &self.inner.synthesizer
    }

    /// Get default credential store
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.inner.credentials
    }

    /// Get upload directory
    pub fn uploads(&self) -> &UploadDirectory {
        &self.inner.uploads
    }
}
