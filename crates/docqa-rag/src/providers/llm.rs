//! LLM provider trait for answer generation

use async_trait::async_trait;

use crate::error::SynthesisError;

/// A single-turn completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    /// User message content
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum generated tokens
    pub max_tokens: u32,
}

/// Trait for chat-completion backends
///
/// The credential is an explicit argument so concurrent requests with
/// different keys never share mutable state.
///
/// Implementations:
/// - `ChatCompletionsClient`: OpenAI-compatible HTTP endpoint (DeepSeek by default)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion and return the first generated message
    async fn complete(
        &self,
        request: &ChatCompletion,
        credential: &str,
    ) -> std::result::Result<String, SynthesisError>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
