//! API routes

pub mod ask;
pub mod settings;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload-document/",
            post(upload::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/ask-question/", post(ask::ask_question))
        .route("/api/settings/", post(settings::save_settings))
        .route("/api/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "docqa-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Single-document question answering over uploaded PDF, DOCX and text files",
        "endpoints": {
            "POST /upload-document/": "Upload a document (multipart field 'document')",
            "POST /ask-question/": "Ask a question about an uploaded document",
            "POST /api/settings/": "Set the default language-model API key",
            "GET /health": "Liveness check"
        }
    }))
}
