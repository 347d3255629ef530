//! Response bodies

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::retrieval::ScoredChunk;

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub document_id: Uuid,
    pub filename: String,
    pub chunk_count: usize,
    pub message: String,
}

/// A retrieved chunk forwarded to the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceChunk {
    /// Position of the chunk in the document
    pub index: usize,
    /// Chunk text
    pub text: String,
    /// Cosine similarity to the question
    pub score: f32,
}

impl From<&ScoredChunk> for SourceChunk {
    fn from(chunk: &ScoredChunk) -> Self {
        Self {
            index: chunk.index,
            text: chunk.text.clone(),
            score: chunk.score,
        }
    }
}

/// Answer to a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    /// Chunks used as context, best first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceChunk>,
}

/// Acknowledgement of a settings change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub status: String,
    pub message: String,
}

impl SettingsResponse {
    /// Success acknowledgement
    pub fn saved() -> Self {
        Self {
            status: "success".to_string(),
            message: "Settings saved".to_string(),
        }
    }
}
