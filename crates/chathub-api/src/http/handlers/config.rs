//! Raw config endpoint (`/api/config`).
//!
//! Unwrapped `ChatConfig` documents, the contract `RemoteConfigStore`
//! clients speak.

use axum::extract::State;
use axum::Json;

use chathub_types::chat::ChatConfig;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/config - The whole directory document.
pub async fn get_config(State(state): State<AppState>) -> Json<ChatConfig> {
    Json(state.directory.config().await)
}

/// POST /api/config - Replace the whole directory document and echo it back.
pub async fn save_config(
    State(state): State<AppState>,
    Json(config): Json<ChatConfig>,
) -> Result<Json<ChatConfig>, AppError> {
    let saved = state.directory.replace_config(config).await?;
    tracing::info!(chats = saved.chats.len(), "Directory replaced via /api/config");
    Ok(Json(saved))
}
