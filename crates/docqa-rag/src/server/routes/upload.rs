//! Document upload endpoint

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::UploadResponse;

/// Multipart field carrying the file
const DOCUMENT_FIELD: &str = "document";

/// POST /upload-document/ - Store, extract, chunk and embed one file
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let id = Uuid::new_v4();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_request(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(DOCUMENT_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::invalid_request(format!("field '{}' has no filename", DOCUMENT_FIELD))
            })?;

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::invalid_request(format!("Failed to read file: {}", e)))?;

        tracing::info!("Processing upload: {} ({} bytes)", filename, data.len());

        let path = state.uploads().save(&id, &filename, &data).await?;

        let document = match state.pipeline().ingest_file(id, &filename, &data).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Ingestion of '{}' failed: {}", filename, e);
                state.uploads().remove(&path).await;
                return Err(e);
            }
        };

        let chunk_count = document.chunk_count();
        state.documents().put(Arc::new(document));

        tracing::info!("Indexed '{}' as {} with {} chunks", filename, id, chunk_count);

        return Ok(Json(UploadResponse {
            document_id: id,
            filename,
            chunk_count,
            message: "Document uploaded successfully".to_string(),
        }));
    }

    Err(Error::invalid_request(format!(
        "missing multipart field '{}'",
        DOCUMENT_FIELD
    )))
}
