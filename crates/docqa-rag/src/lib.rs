//! docqa-rag: single-document question answering
//!
//! Uploads are extracted to plain text, split into line-accumulated chunks and
//! embedded. Questions are embedded the same way, the closest chunks are picked
//! by cosine similarity, and an OpenAI-compatible chat backend answers from
//! that context only.

pub mod config;
pub mod embeddings;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod storage;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result, SynthesisError, TransportErrorKind};
pub use types::{
    document::{FileType, IndexedDocument},
    query::{AskRequest, SettingsRequest},
    response::{AskResponse, UploadResponse},
};
