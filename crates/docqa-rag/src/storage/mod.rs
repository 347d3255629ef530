//! Storage for indexed documents and uploaded files

pub mod document_store;
pub mod uploads;

pub use document_store::{DocumentStore, InMemoryDocumentStore};
pub use uploads::UploadDirectory;
