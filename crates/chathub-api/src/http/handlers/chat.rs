//! Chat entry handlers for the REST API.

use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::Json;

use chathub_types::chat::{ChatItem, ChatUpdate, NewChat};

use crate::http::error::AppError;
use crate::http::extractors::query::ChatListQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

fn chat_response(chat: ChatItem, start: Instant) -> Json<ApiResponse<ChatItem>> {
    let href = format!("/api/v1/chats/{}", chat.id);
    let resp = ApiResponse::timed(chat, start)
        .with_link("self", &href)
        .with_link("favorite", &format!("{href}/favorite"))
        .with_link("visit", &format!("{href}/visit"));
    Json(resp)
}

/// GET /api/v1/chats - List chats matching the query filter.
pub async fn list_chats(
    State(state): State<AppState>,
    Query(query): Query<ChatListQuery>,
) -> Json<ApiResponse<Vec<ChatItem>>> {
    let start = Instant::now();

    let chats = state.directory.query(&query.into_filter()).await;
    let total = chats.len();

    Json(
        ApiResponse::timed(chats, start)
            .with_total(total)
            .with_link("self", "/api/v1/chats")
            .with_link("categories", "/api/v1/categories"),
    )
}

/// POST /api/v1/chats - Add a chat.
pub async fn create_chat(
    State(state): State<AppState>,
    Json(body): Json<NewChat>,
) -> Result<Json<ApiResponse<ChatItem>>, AppError> {
    let start = Instant::now();
    let chat = state.directory.add_chat(body).await?;
    Ok(chat_response(chat, start))
}

/// GET /api/v1/chats/{id} - Get one chat.
pub async fn get_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ChatItem>>, AppError> {
    let start = Instant::now();
    let chat = state.directory.get_chat(&id).await?;
    Ok(chat_response(chat, start))
}

/// PUT /api/v1/chats/{id} - Partially update a chat.
pub async fn update_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ChatUpdate>,
) -> Result<Json<ApiResponse<ChatItem>>, AppError> {
    let start = Instant::now();
    let chat = state.directory.update_chat(&id, body).await?;
    Ok(chat_response(chat, start))
}

/// DELETE /api/v1/chats/{id} - Remove a chat, returning it.
pub async fn delete_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ChatItem>>, AppError> {
    let start = Instant::now();
    let chat = state.directory.delete_chat(&id).await?;
    Ok(Json(
        ApiResponse::timed(chat, start).with_link("chats", "/api/v1/chats"),
    ))
}

/// POST /api/v1/chats/{id}/favorite - Flip the favorite flag.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ChatItem>>, AppError> {
    let start = Instant::now();
    let chat = state.directory.toggle_favorite(&id).await?;
    Ok(chat_response(chat, start))
}

/// POST /api/v1/chats/{id}/visit - Record a launch; the client opens `url`.
pub async fn record_visit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ChatItem>>, AppError> {
    let start = Instant::now();
    let chat = state.directory.record_visit(&id).await?;
    Ok(chat_response(chat, start))
}
