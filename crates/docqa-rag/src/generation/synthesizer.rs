//! Answer synthesis: credential resolution, prompt assembly and one bounded backend call

use std::sync::Arc;
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::SynthesisError;
use crate::providers::{ChatCompletion, LlmProvider};

use super::credentials::CredentialStore;
use super::prompt::PromptBuilder;

/// Sampling temperature of every answer request
pub const TEMPERATURE: f32 = 0.1;

/// Generation limit of every answer request
pub const MAX_TOKENS: u32 = 500;

/// Sends retrieved context plus the question to the language-model backend
pub struct AnswerSynthesizer {
    llm: Arc<dyn LlmProvider>,
    credentials: Arc<CredentialStore>,
    timeout: Duration,
}

impl AnswerSynthesizer {
    /// Create a synthesizer using the timeout from `config`
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        credentials: Arc<CredentialStore>,
        config: &LlmConfig,
    ) -> Self {
        Self {
            llm,
            credentials,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Override the call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Shared default credential store
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Answer `question` from `retrieved_chunks`.
    ///
    /// `credential` applies to this call only; when absent or blank the
    /// process-wide default is used. Without either, no request is made.
    pub async fn synthesize(
        &self,
        question: &str,
        retrieved_chunks: &[String],
        credential: Option<&str>,
    ) -> Result<String, SynthesisError> {
        let credential = self
            .credentials
            .resolve(credential)
            .ok_or(SynthesisError::MissingCredential)?;

        let context = PromptBuilder::build_context(retrieved_chunks);
        let request = ChatCompletion {
            prompt: PromptBuilder::build_qa_prompt(question, &context),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::info!(
            "Synthesizing answer with {} ({}) from {} chunks",
            self.llm.name(),
            self.llm.model(),
            retrieved_chunks.len()
        );

        match tokio::time::timeout(self.timeout, self.llm.complete(&request, &credential)).await {
            Ok(result) => result,
            Err(_) => Err(SynthesisError::timeout(format!(
                "no response within {:?}",
                self.timeout
            ))),
        }
    }
}
