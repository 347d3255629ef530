//! Core types for the document Q&A service

pub mod document;
pub mod query;
pub mod response;

pub use document::{FileType, IndexedDocument};
pub use query::{AskRequest, SettingsRequest};
pub use response::{AskResponse, SettingsResponse, SourceChunk, UploadResponse};
