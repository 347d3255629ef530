//! OpenAI-compatible chat completions client (DeepSeek by default)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{Error, Result, SynthesisError, TransportErrorKind};
use crate::providers::{ChatCompletion, LlmProvider};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Chat completions HTTP client. Makes exactly one attempt per call.
pub struct ChatCompletionsClient {
    client: Client,
    api_url: String,
    model: String,
}

impl ChatCompletionsClient {
    /// Create a client with the configured endpoint, model and timeout
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionsClient {
    async fn complete(
        &self,
        request: &ChatCompletion,
        credential: &str,
    ) -> std::result::Result<String, SynthesisError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::info!("Requesting completion from {} with model {}", self.api_url, self.model);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Completion failed: HTTP {} - {}", status, body);
            return Err(SynthesisError::BackendError {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.bytes().await?;
        let parsed: ChatResponse = serde_json::from_slice(&raw).map_err(|e| {
            SynthesisError::transport(
                TransportErrorKind::Decode,
                format!("Failed to parse completion response: {}", e),
            )
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                SynthesisError::transport(TransportErrorKind::Decode, "completion had no choices")
            })
    }

    fn name(&self) -> &str {
        "chat-completions"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "deepseek-chat",
            messages: [ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.1,
            max_tokens: 500,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert_eq!(json["max_tokens"], 500);
        assert!((json["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"42"},"finish_reason":"stop"}],"usage":{}}"#,
        )
        .unwrap();
        assert_eq!(parsed.choices[0].message.content, "42");
    }
}
