//! Directory-level display settings (title, theme) and overview.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use chathub_types::chat::Theme;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Body for `PUT /api/v1/settings`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct DisplaySettingsBody {
    pub title: Option<String>,
    pub theme: Option<Theme>,
}

/// Directory header shown above the chat grid.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryOverview {
    pub title: String,
    pub theme: Theme,
    pub categories: Vec<String>,
    pub total_chats: usize,
    pub favorite_chats: usize,
    pub backend: String,
    pub error: Option<String>,
}

async fn overview(state: &AppState) -> DirectoryOverview {
    let view = state.directory.snapshot().await;
    DirectoryOverview {
        title: view.config.title.clone(),
        theme: view.config.theme,
        total_chats: view.config.chats.len(),
        favorite_chats: view.config.favorite_count(),
        categories: view.categories,
        backend: state.settings.storage.backend.to_string(),
        error: view.error,
    }
}

/// GET /api/v1/directory - Title, theme, categories and counts.
pub async fn get_directory(
    State(state): State<AppState>,
) -> Json<ApiResponse<DirectoryOverview>> {
    let start = Instant::now();
    let data = overview(&state).await;
    Json(
        ApiResponse::timed(data, start)
            .with_link("self", "/api/v1/directory")
            .with_link("chats", "/api/v1/chats")
            .with_link("categories", "/api/v1/categories"),
    )
}

/// PUT /api/v1/settings - Change the title and/or theme.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(body): Json<DisplaySettingsBody>,
) -> Result<Json<ApiResponse<DirectoryOverview>>, AppError> {
    let start = Instant::now();

    if body.title.is_none() && body.theme.is_none() {
        return Err(AppError::Validation(
            "nothing to update: pass title or theme".to_string(),
        ));
    }
    state
        .directory
        .update_display(body.title.as_deref(), body.theme)
        .await?;

    let data = overview(&state).await;
    Ok(Json(
        ApiResponse::timed(data, start).with_link("directory", "/api/v1/directory"),
    ))
}
