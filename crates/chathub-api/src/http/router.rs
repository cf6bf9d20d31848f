//! Axum router configuration with middleware.
//!
//! - `/api/config`: the raw directory document (remote backend contract).
//! - `/api/v1/`: envelope-wrapped chat, category and settings routes.
//! - `/health`: liveness plus the current load/save error, if any.
//!
//! When `server.web_dir` points at a built web UI, unknown paths fall through
//! to its `index.html` for client-side routing.

use axum::extract::State;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Chats
        .route(
            "/chats",
            get(handlers::chat::list_chats).post(handlers::chat::create_chat),
        )
        .route(
            "/chats/{id}",
            get(handlers::chat::get_chat)
                .put(handlers::chat::update_chat)
                .delete(handlers::chat::delete_chat),
        )
        .route("/chats/{id}/favorite", post(handlers::chat::toggle_favorite))
        .route("/chats/{id}/visit", post(handlers::chat::record_visit))
        // Categories
        .route(
            "/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/categories/{name}",
            put(handlers::category::rename_category)
                .delete(handlers::category::delete_category),
        )
        // Directory settings
        .route("/directory", get(handlers::settings::get_directory))
        .route("/settings", put(handlers::settings::update_settings));

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route(
            "/api/config",
            get(handlers::config::get_config).post(handlers::config::save_config),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    if let Some(web_dir) = state.settings.server.web_dir.as_deref() {
        if web_dir.exists() {
            let serve_dir =
                ServeDir::new(web_dir).fallback(ServeFile::new(web_dir.join("index.html")));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir.display(), "Static web UI serving enabled");
        } else {
            tracing::warn!(
                path = %web_dir.display(),
                "server.web_dir does not exist, serving API only"
            );
        }
    }

    router
}

/// GET /health - Liveness and storage status.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let error = state.directory.error().await;
    axum::Json(serde_json::json!({
        "status": if error.is_none() { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.settings.storage.backend.to_string(),
        "error": error,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use chathub_types::chat::{default_config, ChatConfig, Theme};
    use chathub_types::settings::{Settings, StorageBackend};

    /// Router over a JSON-file backend in a temp dir, already loaded.
    async fn test_app() -> (Router, AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.storage.backend = StorageBackend::File;

        let state = AppState::with_settings(settings, dir.path()).await.unwrap();
        state.load().await.unwrap();
        (build_router(state.clone()), state, dir)
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _state, _dir) = test_app().await;
        let (status, body) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["backend"], "file");
    }

    #[tokio::test]
    async fn test_list_chats_with_filters() {
        let (router, _state, _dir) = test_app().await;

        let (status, body) = send(&router, Method::GET, "/api/v1/chats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["total"], 6);

        let (_, body) = send(&router, Method::GET, "/api/v1/chats?q=CODE", None).await;
        assert_eq!(body["data"][0]["id"], "2");
        assert_eq!(body["meta"]["total"], 1);

        let (_, body) = send(&router, Method::GET, "/api/v1/chats?favorites=true", None).await;
        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);

        let (_, body) = send(
            &router,
            Method::GET,
            "/api/v1/chats?category=Education",
            None,
        )
        .await;
        assert_eq!(body["data"][0]["name"], "Study Buddy");
    }

    #[tokio::test]
    async fn test_chat_crud() {
        let (router, state, _dir) = test_app().await;

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/v1/chats",
            Some(json!({
                "name": "Translator",
                "url": "https://example.com/chat/translate",
                "category": "Education",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["_links"]["self"], format!("/api/v1/chats/{id}"));

        let (status, body) = send(
            &router,
            Method::PUT,
            &format!("/api/v1/chats/{id}"),
            Some(json!({"description": "Any language"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["description"], "Any language");
        assert_eq!(body["data"]["name"], "Translator");

        let (status, _) = send(&router, Method::DELETE, &format!("/api/v1/chats/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.directory.get_chat(&id).await.is_err());

        let (status, body) = send(&router, Method::GET, &format!("/api/v1/chats/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["code"], "CHAT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_chat_conflict_and_validation() {
        let (router, _state, _dir) = test_app().await;

        let (status, _) = send(
            &router,
            Method::POST,
            "/api/v1/chats",
            Some(json!({"id": "1", "name": "Dup", "url": "https://example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/v1/chats",
            Some(json!({"name": "  ", "url": "https://example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_favorite_and_visit() {
        let (router, _state, _dir) = test_app().await;

        let (_, body) = send(&router, Method::POST, "/api/v1/chats/2/favorite", None).await;
        assert_eq!(body["data"]["favorite"], true);

        let (_, body) = send(&router, Method::POST, "/api/v1/chats/2/visit", None).await;
        assert_eq!(body["data"]["url"], "https://example.com/chat/code");
        assert!(body["data"]["lastVisited"].is_string());
    }

    #[tokio::test]
    async fn test_category_rename_cascades() {
        let (router, state, _dir) = test_app().await;

        let (status, body) = send(
            &router,
            Method::PUT,
            "/api/v1/categories/Education",
            Some(json!({"name": "Learning"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().contains(&json!("Learning")));
        assert_eq!(
            state.directory.get_chat("5").await.unwrap().category.as_deref(),
            Some("Learning")
        );

        let (status, _) = send(
            &router,
            Method::POST,
            "/api/v1/categories",
            Some(json!({"name": "Learning"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&router, Method::DELETE, "/api/v1/categories/Learning", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.directory.get_chat("5").await.unwrap().category.is_none());

        let (status, _) = send(&router, Method::DELETE, "/api/v1/categories/Nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_settings() {
        let (router, state, _dir) = test_app().await;

        let (status, body) = send(
            &router,
            Method::PUT,
            "/api/v1/settings",
            Some(json!({"title": "Team Hub", "theme": "dark"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "Team Hub");
        assert_eq!(body["data"]["theme"], "dark");

        let (status, _) = send(&router, Method::PUT, "/api/v1/settings", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // A rejected title leaves the theme alone too.
        let (status, _) = send(
            &router,
            Method::PUT,
            "/api/v1/settings",
            Some(json!({"title": " ", "theme": "light"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let config = state.directory.config().await;
        assert_eq!(config.title, "Team Hub");
        assert_eq!(config.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_raw_config_roundtrip() {
        let (router, state, _dir) = test_app().await;

        let (status, body) = send(&router, Method::GET, "/api/config", None).await;
        assert_eq!(status, StatusCode::OK);
        let config: ChatConfig = serde_json::from_value(body).unwrap();
        assert_eq!(config, default_config());

        let mut replacement = default_config();
        replacement.title = "Replaced".to_string();
        replacement.chats.truncate(2);
        let (status, _) = send(
            &router,
            Method::POST,
            "/api/config",
            Some(serde_json::to_value(&replacement).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.directory.config().await, replacement);
    }

    #[tokio::test]
    async fn test_raw_config_rejects_duplicate_ids() {
        let (router, _state, _dir) = test_app().await;

        let mut config = default_config();
        config.chats[1].id = "1".to_string();
        let (status, _) = send(
            &router,
            Method::POST,
            "/api/config",
            Some(serde_json::to_value(&config).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
