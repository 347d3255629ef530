//! ONNX-based embedding generation
//!
//! Runs sentence-transformers/all-MiniLM-L6-v2 in-process: mean pooling over the
//! attention mask followed by L2 normalisation, 384 dimensions.

use async_trait::async_trait;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tokenizers::{Encoding, Tokenizer};

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;

/// Model and tokenizer, used from one blocking thread at a time
struct OnnxModel {
    session: Session,
    tokenizer: Tokenizer,
    dimensions: usize,
    max_length: usize,
    batch_size: usize,
}

/// ONNX-based text embedder
pub struct OnnxEmbedder {
    model: Arc<Mutex<OnnxModel>>,
    dimensions: usize,
}

impl OnnxEmbedder {
    /// Load the model, downloading it into the cache directory on first use
    pub async fn new(config: &EmbeddingConfig) -> Result<Self> {
        tracing::info!("Initializing ONNX embedder with model: {}", config.model);

        tokio::fs::create_dir_all(&config.cache_dir).await.map_err(|e| {
            Error::Config(format!("Failed to create cache directory: {}", e))
        })?;

        let model_path = config.cache_dir.join("model.onnx");
        let tokenizer_path = config.cache_dir.join("tokenizer.json");

        if !model_path.exists() {
            download(&config.model, "onnx/model.onnx", &model_path).await?;
        }
        if !tokenizer_path.exists() {
            download(&config.model, "tokenizer.json", &tokenizer_path).await?;
        }

        let session = Session::builder()
            .map_err(|e| Error::embedding(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::embedding(format!("Failed to set optimization level: {}", e)))?
            .with_intra_threads(4)
            .map_err(|e| Error::embedding(format!("Failed to set threads: {}", e)))?
            .commit_from_file(&model_path)
            .map_err(|e| Error::embedding(format!("Failed to load model: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::embedding(format!("Failed to load tokenizer: {}", e)))?;

        tracing::info!("ONNX embedder initialized");

        Ok(Self {
            model: Arc::new(Mutex::new(OnnxModel {
                session,
                tokenizer,
                dimensions: config.dimensions,
                max_length: config.max_length,
                batch_size: config.batch_size.max(1),
            })),
            dimensions: config.dimensions,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OnnxEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut model = model.lock();
            let mut all = Vec::with_capacity(texts.len());
            for batch in texts.chunks(model.batch_size) {
                all.extend(model.embed(batch)?);
            }
            Ok(all)
        })
        .await
        .map_err(|e| Error::internal(format!("Task join error: {}", e)))?
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

impl OnnxModel {
    fn embed(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| Error::embedding(format!("Tokenization failed: {}", e)))?;

        let seq_len = encodings
            .iter()
            .map(|enc| enc.len())
            .max()
            .unwrap_or(0)
            .min(self.max_length);

        // Row-major [batch, seq_len], zero padded.
        let padded = |field: fn(&Encoding) -> &[u32]| -> Vec<i64> {
            encodings
                .iter()
                .flat_map(|enc| {
                    let mut row: Vec<i64> =
                        field(enc).iter().take(seq_len).map(|&v| i64::from(v)).collect();
                    row.resize(seq_len, 0);
                    row
                })
                .collect()
        };
        let input_ids = padded(Encoding::get_ids);
        let attention_mask = padded(Encoding::get_attention_mask);
        let token_type_ids = padded(Encoding::get_type_ids);

        let shape = vec![texts.len(), seq_len];
        let tensor = |data: &[i64], what: &str| {
            Tensor::from_array((shape.clone(), data.to_vec().into_boxed_slice()))
                .map(|t| t.into_dyn())
                .map_err(|e| Error::embedding(format!("{} tensor creation failed: {}", what, e)))
        };

        let inputs = vec![
            ("input_ids", tensor(&input_ids, "Input")?),
            ("attention_mask", tensor(&attention_mask, "Attention mask")?),
            ("token_type_ids", tensor(&token_type_ids, "Token type")?),
        ];

        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| Error::embedding(format!("Inference failed: {}", e)))?;

        let (_, hidden) = outputs
            .iter()
            .find(|(name, _)| *name == "last_hidden_state")
            .ok_or_else(|| Error::embedding("model has no last_hidden_state output"))?;
        let (out_shape, data) = hidden
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::embedding(format!("Failed to extract tensor: {}", e)))?;

        let hidden_size = out_shape
            .get(2)
            .map(|&d| d as usize)
            .unwrap_or(self.dimensions);
        if hidden_size == 0 || seq_len == 0 {
            return Ok(vec![vec![0.0; self.dimensions]; texts.len()]);
        }

        Ok(data
            .chunks_exact(seq_len * hidden_size)
            .zip(attention_mask.chunks_exact(seq_len))
            .map(|(tokens, mask)| mean_pool_normalized(tokens, mask, hidden_size))
            .collect())
    }
}

/// Average the unmasked token vectors, then scale to unit length
fn mean_pool_normalized(tokens: &[f32], mask: &[i64], hidden_size: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; hidden_size];
    let mut kept = 0usize;

    for (token, _) in tokens
        .chunks_exact(hidden_size)
        .zip(mask)
        .filter(|(_, &m)| m != 0)
    {
        pooled.iter_mut().zip(token).for_each(|(acc, v)| *acc += v);
        kept += 1;
    }

    let divisor = kept.max(1) as f32;
    let norm = pooled.iter().map(|v| (v / divisor).powi(2)).sum::<f32>().sqrt();
    if norm > 0.0 {
        pooled.iter_mut().for_each(|v| *v /= divisor * norm);
    }
    pooled
}


/// Fetch a file from the sentence-transformers repository on Hugging Face
async fn download(model_name: &str, file: &str, path: &Path) -> Result<()> {
    let url = format!(
        "https://huggingface.co/sentence-transformers/{}/resolve/main/{}",
        model_name, file
    );

    tracing::info!("Downloading {}", url);

    let response = reqwest::get(&url)
        .await
        .map_err(|e| Error::embedding(format!("Failed to download {}: {}", file, e)))?;

    if !response.status().is_success() {
        return Err(Error::embedding(format!(
            "Download of {} failed: HTTP {}",
            file,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::embedding(format!("Failed to read {}: {}", file, e)))?;

    tokio::fs::write(path, &bytes).await?;

    tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());

    Ok(())
}
