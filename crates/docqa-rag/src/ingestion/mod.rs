//! Document ingestion: text extraction, chunking and embedding

pub mod chunker;
pub mod parser;
pub mod processor;

pub use chunker::TextChunker;
pub use parser::{ExtractedText, FileParser};
pub use processor::IngestPipeline;
