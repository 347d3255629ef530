//! Error types for the document Q&A service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors, recovered at the request boundary
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported or corrupt upload
    #[error("Failed to extract text from '{filename}': {message}")]
    Extraction { filename: String, message: String },

    /// Chunking produced nothing or embedding failed during ingestion
    #[error("Failed to ingest document: {0}")]
    Ingestion(String),

    /// Embedding failed while answering a question
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Malformed request body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Question referenced an unknown document
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Language-model backend failure
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures of the answer synthesizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// Neither a per-request nor a default credential is available
    #[error("No language-model API key configured; set one in the settings or pass it with the question")]
    MissingCredential,

    /// Backend answered with a non-success status
    #[error("Language-model backend returned HTTP {status}: {body}")]
    BackendError { status: u16, body: String },

    /// The request never produced a usable response
    #[error("Language-model request failed ({kind}): {message}")]
    TransportError {
        kind: TransportErrorKind,
        message: String,
    },
}

/// Classification of transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Decode,
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Decode => "decode",
            Self::Other => "transport",
        };
        f.write_str(name)
    }
}

impl SynthesisError {
    /// Create a transport error of the given kind
    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self::TransportError {
            kind,
            message: message.into(),
        }
    }

    /// Create a timeout transport error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::transport(TransportErrorKind::Timeout, message)
    }
}

impl From<reqwest::Error> for SynthesisError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_decode() {
            TransportErrorKind::Decode
        } else {
            TransportErrorKind::Other
        };
        Self::transport(kind, err.to_string())
    }
}

impl Error {
    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an ingestion error
    pub fn ingestion(message: impl Into<String>) -> Self {
        Self::Ingestion(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create an invalid-request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Config(_) => StatusCode::BAD_REQUEST,
            Error::Extraction { .. } | Error::Ingestion(_) => StatusCode::BAD_REQUEST,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            Error::Synthesis(SynthesisError::MissingCredential) => StatusCode::BAD_REQUEST,
            Error::Synthesis(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Json(_) => StatusCode::BAD_REQUEST,
            Error::Embedding(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::Extraction { .. } => "extraction_error",
            Error::Ingestion(_) => "ingestion_error",
            Error::Embedding(_) => "embedding_error",
            Error::InvalidRequest(_) => "invalid_request",
            Error::DocumentNotFound(_) => "not_found",
            Error::Synthesis(SynthesisError::MissingCredential) => "missing_credential",
            Error::Synthesis(SynthesisError::BackendError { .. }) => "backend_error",
            Error::Synthesis(SynthesisError::TransportError { .. }) => "transport_error",
            Error::Io(_) => "io_error",
            Error::Json(_) => "json_error",
            Error::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
