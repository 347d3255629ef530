//! Configuration for the document Q&A service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Environment variable pointing at an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "DOCQA_CONFIG";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Language-model backend configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Upload storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 100MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
            max_upload_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Line-accumulating chunker thresholds, in characters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Lines shorter than this (after trimming) are dropped as noise
    pub min_line_chars: usize,
    /// A chunk is closed when appending the next line would exceed this
    pub max_chunk_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            min_line_chars: 5,
            max_chunk_chars: 500,
        }
    }
}

/// Which embedding backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Ollama HTTP embeddings
    #[default]
    Ollama,
    /// Local ONNX model (requires the `onnx` feature)
    Onnx,
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Backend selection
    pub backend: EmbeddingBackend,
    /// Ollama base URL
    pub base_url: String,
    /// Model name (Ollama model or sentence-transformers repo)
    pub model: String,
    /// Embedding dimensions (384 for MiniLM, 768 for nomic-embed-text)
    pub dimensions: usize,
    /// Batch size for local embedding
    pub batch_size: usize,
    /// Maximum sequence length for local embedding
    pub max_length: usize,
    /// Request timeout in seconds for HTTP embeddings
    pub timeout_secs: u64,
    /// Cache directory for local models
    pub cache_dir: PathBuf,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Ollama,
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            batch_size: 32,
            max_length: 256,
            timeout_secs: 120,
            cache_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("docqa-rag")
                .join("models"),
        }
    }
}

/// Chat-completions backend configuration.
///
/// Sampling is fixed by the synthesizer; unknown keys such as `temperature`
/// are rejected rather than silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LlmConfig {
    /// Chat completions endpoint
    pub api_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Process-wide default API key (replaceable at runtime via settings)
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.deepseek.com/v1/chat/completions".to_string(),
            model: "deepseek-chat".to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of chunks forwarded to the backend
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: crate::retrieval::DEFAULT_TOP_K,
        }
    }
}

/// Upload storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory receiving uploaded files
    pub upload_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

impl RagConfig {
    /// Load configuration: defaults, then the TOML file named by `DOCQA_CONFIG`,
    /// then `.env` and process environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Apply overrides from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_var("PORT", &port)?;
        }
        if let Some(key) = lookup("DEEPSEEK_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = lookup("DEEPSEEK_API_URL") {
            self.llm.api_url = url;
        }
        if let Some(model) = lookup("DEEPSEEK_MODEL") {
            self.llm.model = model;
        }
        if let Some(secs) = lookup("LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_var("LLM_TIMEOUT_SECS", &secs)?;
        }
        if let Some(url) = lookup("OLLAMA_URL") {
            self.embeddings.base_url = url;
        }
        if let Some(model) = lookup("EMBED_MODEL") {
            self.embeddings.model = model;
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            self.storage.upload_dir = PathBuf::from(dir);
        }
        if let Some(k) = lookup("TOP_K") {
            self.retrieval.top_k = parse_var("TOP_K", &k)?;
        }
        Ok(())
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_chunk_chars == 0 {
            return Err(Error::Config("chunking.max_chunk_chars must be > 0".into()));
        }
        if self.chunking.min_line_chars > self.chunking.max_chunk_chars {
            return Err(Error::Config(
                "chunking.min_line_chars must not exceed chunking.max_chunk_chars".into(),
            ));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::Config("retrieval.top_k must be > 0".into()));
        }
        if self.llm.timeout_secs == 0 {
            return Err(Error::Config("llm.timeout_secs must be > 0".into()));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {}='{}': {}", name, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let config = RagConfig::default();
        assert_eq!(config.chunking.min_line_chars, 5);
        assert_eq!(config.chunking.max_chunk_chars, 500);
        assert_eq!(config.retrieval.top_k, 3);
        assert!(config.llm.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "9000"),
            ("DEEPSEEK_API_KEY", "sk-test"),
            ("TOP_K", "5"),
            ("UPLOAD_DIR", "/tmp/up"),
        ]
        .into_iter()
        .collect();

        let mut config = RagConfig::default();
        config
            .apply_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.storage.upload_dir, PathBuf::from("/tmp/up"));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let mut config = RagConfig::default();
        config
            .apply_env(|k| (k == "DEEPSEEK_API_KEY").then(|| "  ".to_string()))
            .unwrap();
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let mut config = RagConfig::default();
        let err = config
            .apply_env(|k| (k == "PORT").then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_partial_toml() {
        let config: RagConfig = toml::from_str(
            r#"
            [chunking]
            min_line_chars = 3
            max_chunk_chars = 200

            [retrieval]
            top_k = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.chunking.max_chunk_chars, 200);
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_sampling_cannot_be_configured() {
        for key in ["temperature = 0.9", "max_tokens = 4000"] {
            let raw = format!("[llm]\nmodel = \"deepseek-chat\"\n{}\n", key);
            let result: std::result::Result<RagConfig, _> = toml::from_str(&raw);
            assert!(result.is_err(), "{key} should be rejected");
        }
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut config = RagConfig::default();
        config.chunking.min_line_chars = 600;
        assert!(config.validate().is_err());
    }
}
