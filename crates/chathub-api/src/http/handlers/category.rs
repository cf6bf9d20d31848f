//! Category handlers for the REST API.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Body for creating or renaming a category.
#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub name: String,
}

fn categories_response(categories: Vec<String>, start: Instant) -> Json<ApiResponse<Vec<String>>> {
    let total = categories.len();
    Json(
        ApiResponse::timed(categories, start)
            .with_total(total)
            .with_link("self", "/api/v1/categories"),
    )
}

/// GET /api/v1/categories - Category names in display order.
pub async fn list_categories(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    let start = Instant::now();
    categories_response(state.directory.categories().await, start)
}

/// POST /api/v1/categories - Add a category.
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CategoryBody>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let start = Instant::now();
    let categories = state.directory.add_category(&body.name).await?;
    Ok(categories_response(categories, start))
}

/// PUT /api/v1/categories/{name} - Rename a category; chats follow.
pub async fn rename_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<CategoryBody>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let start = Instant::now();
    let categories = state.directory.rename_category(&name, &body.name).await?;
    Ok(categories_response(categories, start))
}

/// DELETE /api/v1/categories/{name} - Remove a category; its chats become uncategorized.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let start = Instant::now();
    let categories = state.directory.delete_category(&name).await?;
    Ok(categories_response(categories, start))
}
