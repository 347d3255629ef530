//! Shared fakes for integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use docqa_rag::config::RagConfig;
use docqa_rag::error::{Result, SynthesisError};
use docqa_rag::providers::{ChatCompletion, EmbeddingProvider, LlmProvider};
use docqa_rag::server::state::AppState;
use parking_lot::Mutex;

/// Words the keyword embedder counts, one dimension each
pub const VOCABULARY: [&str; 5] = ["cat", "dog", "rust", "python", "ocean"];

/// Deterministic embedder: one dimension per vocabulary word, valued by
/// occurrence count
pub struct KeywordEmbedder;

impl KeywordEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        VOCABULARY
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        VOCABULARY.len()
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

/// One recorded backend call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub credential: String,
}

/// Fake backend that records calls and answers with the credential it saw
#[derive(Default)]
pub struct RecordingLlm {
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl RecordingLlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep before answering, so concurrent calls interleave
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            delay: Some(delay),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl LlmProvider for RecordingLlm {
    async fn complete(
        &self,
        request: &ChatCompletion,
        credential: &str,
    ) -> std::result::Result<String, SynthesisError> {
        self.calls.lock().push(RecordedCall {
            prompt: request.prompt.clone(),
            credential: credential.to_string(),
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(format!("answered with {}", credential))
    }

    fn name(&self) -> &str {
        "recording"
    }

    fn model(&self) -> &str {
        "recording-model"
    }
}

/// Fake backend that always fails with a fixed HTTP status and body
pub struct FailingLlm {
    pub status: u16,
    pub body: String,
}

#[async_trait]
impl LlmProvider for FailingLlm {
    async fn complete(
        &self,
        _request: &ChatCompletion,
        _credential: &str,
    ) -> std::result::Result<String, SynthesisError> {
        Err(SynthesisError::BackendError {
            status: self.status,
            body: self.body.clone(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn model(&self) -> &str {
        "failing-model"
    }
}

/// Build application state with fake providers and an upload directory
/// inside `upload_root`
pub fn test_state(
    upload_root: &std::path::Path,
    default_key: Option<&str>,
    llm: Arc<dyn LlmProvider>,
) -> AppState {
    let mut config = RagConfig::default();
    config.storage.upload_dir = upload_root.join("uploads");
    config.llm.api_key = default_key.map(str::to_string);

    AppState::with_providers(config, Arc::new(KeywordEmbedder), llm).unwrap()
}
