//! Question answering endpoint

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::retrieval::retrieve;
use crate::server::state::AppState;
use crate::types::{AskRequest, AskResponse, SourceChunk};

/// POST /ask-question/ - Answer a question about one uploaded document
pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let document = Uuid::parse_str(request.document_id.trim())
        .ok()
        .and_then(|id| state.documents().get(&id))
        .ok_or_else(|| Error::DocumentNotFound(request.document_id.clone()))?;

    tracing::info!("Question for {}: {}", document.id, request.question);

    let question_vector = state
        .embedder()
        .embed(&request.question)
        .await
        .map_err(|e| match e {
            Error::Embedding(_) => e,
            other => Error::embedding(other.to_string()),
        })?;

    let retrieved = retrieve(
        &question_vector,
        document.vectors(),
        document.chunks(),
        state.config().retrieval.top_k,
    );

    let context: Vec<String> = retrieved.iter().map(|c| c.text.clone()).collect();

    let answer = state
        .synthesizer()
        .synthesize(&request.question, &context, request.credential.as_deref())
        .await
        .inspect_err(|e| tracing::warn!("Answer synthesis failed: {}", e))?;

    Ok(Json(AskResponse {
        answer,
        sources: retrieved.iter().map(SourceChunk::from).collect(),
    }))
}
