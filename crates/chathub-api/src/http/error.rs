//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use chathub_types::error::{DirectoryError, StoreError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Directory errors (chats, categories, storage).
    Directory(DirectoryError),
    /// Validation error.
    Validation(String),
}

impl From<DirectoryError> for AppError {
    fn from(e: DirectoryError) -> Self {
        AppError::Directory(e)
    }
}

impl AppError {
    /// Status code, machine-readable code and message for this error.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Directory(e @ DirectoryError::ChatNotFound(_)) => {
                (StatusCode::NOT_FOUND, "CHAT_NOT_FOUND", e.to_string())
            }
            AppError::Directory(e @ DirectoryError::CategoryNotFound(_)) => {
                (StatusCode::NOT_FOUND, "CATEGORY_NOT_FOUND", e.to_string())
            }
            AppError::Directory(e @ DirectoryError::DuplicateChatId(_)) => {
                (StatusCode::CONFLICT, "DUPLICATE_CHAT_ID", e.to_string())
            }
            AppError::Directory(e @ DirectoryError::CategoryExists(_)) => {
                (StatusCode::CONFLICT, "CATEGORY_EXISTS", e.to_string())
            }
            AppError::Directory(DirectoryError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Directory(DirectoryError::Storage(StoreError::InvalidConfig(msg))) => {
                (StatusCode::BAD_REQUEST, "INVALID_CONFIG", msg.clone())
            }
            AppError::Directory(DirectoryError::Storage(e)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(code, "Request failed: {message}");
        }

        (status, Json(ApiResponse::error(code, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::from(DirectoryError::ChatNotFound("x".into())), StatusCode::NOT_FOUND),
            (AppError::from(DirectoryError::CategoryNotFound("x".into())), StatusCode::NOT_FOUND),
            (AppError::from(DirectoryError::DuplicateChatId("x".into())), StatusCode::CONFLICT),
            (AppError::from(DirectoryError::CategoryExists("x".into())), StatusCode::CONFLICT),
            (AppError::from(DirectoryError::Validation("x".into())), StatusCode::BAD_REQUEST),
            (
                AppError::from(DirectoryError::Storage(StoreError::Unavailable("down".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(err.parts().0, expected, "{err:?}");
        }
    }

    #[test]
    fn test_not_found_message() {
        let (_, code, message) = AppError::from(DirectoryError::ChatNotFound("42".into())).parts();
        assert_eq!(code, "CHAT_NOT_FOUND");
        assert_eq!(message, "chat '42' not found");
    }
}
