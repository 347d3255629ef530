//! Settings endpoint

use axum::{extract::State, Json};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{SettingsRequest, SettingsResponse};

/// POST /api/settings/ - Replace the default API key
pub async fn save_settings(
    State(state): State<AppState>,
    Json(request): Json<SettingsRequest>,
) -> Result<Json<SettingsResponse>> {
    if request.credential.trim().is_empty() {
        return Err(Error::invalid_request("credential must not be blank"));
    }

    state.credentials().set(request.credential);
    tracing::info!("Default API key updated");

    Ok(Json(SettingsResponse::saved()))
}
