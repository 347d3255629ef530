//! Indexed document with index-aligned chunks and vectors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Upload formats the text extractor understands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text file
    Txt,
    /// CSV file, read as plain text
    Csv,
    /// Markdown file, read as plain text
    Markdown,
    /// Anything else
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "txt" => Self::Txt,
            "csv" => Self::Csv,
            "md" => Self::Markdown,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from a filename
    pub fn from_filename(filename: &str) -> Self {
        std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }
}

/// A fully ingested document.
///
/// Built only once chunking and embedding have both succeeded and never
/// mutated afterwards, so it can be shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    /// Unique identifier
    pub id: Uuid,
    /// Original upload filename
    pub filename: String,
    /// File type detected at upload
    pub file_type: FileType,
    /// Full extracted text, kept for provenance
    pub raw_text: String,
    /// When the document was ingested
    pub created_at: DateTime<Utc>,
    chunks: Vec<String>,
    vectors: Vec<Vec<f32>>,
}

impl IndexedDocument {
    /// Assemble a document, enforcing the chunk/vector invariants
    pub fn new(
        id: Uuid,
        filename: impl Into<String>,
        raw_text: String,
        chunks: Vec<String>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<Self> {
        if chunks.is_empty() {
            return Err(Error::ingestion("document produced no chunks"));
        }
        if chunks.len() != vectors.len() {
            return Err(Error::ingestion(format!(
                "embedding count mismatch: {} chunks, {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }

        let filename = filename.into();
        Ok(Self {
            id,
            file_type: FileType::from_filename(&filename),
            filename,
            raw_text,
            created_at: Utc::now(),
            chunks,
            vectors,
        })
    }

    /// Chunks in order of appearance
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Chunk vectors, index-aligned with [`Self::chunks`]
    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    /// Number of chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_filename("report.PDF"), FileType::Pdf);
        assert_eq!(FileType::from_filename("notes.md"), FileType::Markdown);
        assert_eq!(FileType::from_filename("data.csv"), FileType::Csv);
        assert_eq!(FileType::from_filename("letter.docx"), FileType::Docx);
        assert_eq!(FileType::from_filename("archive.zip"), FileType::Unknown);
        assert_eq!(FileType::from_filename("README"), FileType::Unknown);
    }

    #[test]
    fn test_rejects_misaligned_vectors() {
        let err = IndexedDocument::new(
            Uuid::new_v4(),
            "a.txt",
            "text".into(),
            vec!["one chunk".into(), "two chunk".into()],
            vec![vec![1.0, 0.0]],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Ingestion(_)));
    }

    #[test]
    fn test_rejects_empty_document() {
        let err =
            IndexedDocument::new(Uuid::new_v4(), "a.txt", String::new(), vec![], vec![]).unwrap_err();
        assert!(matches!(err, Error::Ingestion(_)));
    }

    #[test]
    fn test_aligned_document() {
        let doc = IndexedDocument::new(
            Uuid::new_v4(),
            "a.txt",
            "Hello world".into(),
            vec!["Hello world".into()],
            vec![vec![0.5, 0.5]],
        )
        .unwrap();
        assert_eq!(doc.chunk_count(), 1);
        assert_eq!(doc.vectors().len(), doc.chunks().len());
        assert_eq!(doc.file_type, FileType::Txt);
    }
}
