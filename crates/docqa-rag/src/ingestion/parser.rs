//! Text extraction from uploaded files

use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::FileType;

/// How long PDF extraction may run before the upload is rejected
const PDF_EXTRACT_TIMEOUT: Duration = Duration::from_secs(60);

/// Plain text extracted from an upload
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Detected file type
    pub file_type: FileType,
    /// Extracted text, one line per paragraph/page line
    pub content: String,
}

/// Converts PDF, DOCX and plain-text uploads to a single string
pub struct FileParser;

impl FileParser {
    /// Extract text based on the filename's extension
    pub fn parse(filename: &str, data: &[u8]) -> Result<ExtractedText> {
        let file_type = FileType::from_filename(filename);

        let content = match file_type {
            FileType::Pdf => Self::parse_pdf(filename, data)?,
            FileType::Docx => Self::parse_docx(filename, data)?,
            FileType::Txt | FileType::Csv | FileType::Markdown => Self::parse_text(data),
            FileType::Unknown => {
                let ext = std::path::Path::new(filename)
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("");
                return Err(Error::extraction(
                    filename,
                    format!("unsupported file format: .{}", ext),
                ));
            }
        };

        Ok(ExtractedText { file_type, content })
    }

    /// Extract PDF text on a worker thread so a hanging or panicking decoder
    /// cannot take the request down with it
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<String> {
        use std::sync::mpsc;
        use std::thread;

        let data_vec = data.to_vec();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&data_vec);
            let _ = tx.send(result.map_err(|e| e.to_string()));
        });

        match rx.recv_timeout(PDF_EXTRACT_TIMEOUT) {
            Ok(Ok(text)) => Ok(text.replace('\0', "")),
            Ok(Err(e)) => Err(Error::extraction(filename, format!("corrupt PDF: {}", e))),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::error!("PDF extraction of '{}' timed out", filename);
                Err(Error::extraction(filename, "PDF extraction timed out"))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::error!("PDF extraction thread for '{}' crashed", filename);
                Err(Error::extraction(filename, "PDF could not be decoded"))
            }
        }
    }

    /// Extract DOCX paragraphs, one per line
    fn parse_docx(filename: &str, data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| Error::extraction(filename, format!("corrupt DOCX: {}", e)))?;

        let mut paragraphs = Vec::new();

        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                let mut text = String::new();
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                paragraphs.push(text);
            }
        }

        Ok(paragraphs.join("\n"))
    }

    /// Plain text, invalid UTF-8 replaced
    fn parse_text(data: &[u8]) -> String {
        String::from_utf8_lossy(data).into_owned()
    }
}
