use thiserror::Error;

/// Errors related to directory operations (chats, categories, settings).
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("chat '{0}' not found")]
    ChatNotFound(String),

    #[error("chat id '{0}' already exists")]
    DuplicateChatId(String),

    #[error("category '{0}' not found")]
    CategoryNotFound(String),

    #[error("category '{0}' already exists")]
    CategoryExists(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Errors from config store backends (used by trait definitions in chathub-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_error_display() {
        let err = DirectoryError::CategoryExists("Tools".to_string());
        assert_eq!(err.to_string(), "category 'Tools' already exists");
    }

    #[test]
    fn test_storage_error_is_transparent() {
        let err: DirectoryError = StoreError::Http("503 Service Unavailable".to_string()).into();
        assert_eq!(err.to_string(), "http error: 503 Service Unavailable");
    }

    #[test]
    fn test_store_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
