//! Local storage backend.
//!
//! Persists the whole directory as one JSON value under a fixed key in a
//! `KvStore`. This is the default backend and the offline fallback for the
//! remote one.

use chathub_core::storage::config_store::ConfigStore;
use chathub_core::storage::kv_store::KvStore;
use chathub_types::chat::ChatConfig;
use chathub_types::error::StoreError;

use crate::sqlite::kv::SqliteKvStore;

/// Key under which the directory document is stored.
pub const CONFIG_KEY: &str = "chat-config";

/// `ConfigStore` over any `KvStore`.
#[derive(Clone)]
pub struct LocalConfigStore<K: KvStore> {
    kv: K,
}

/// The local backend as wired by the application.
pub type SqliteConfigStore = LocalConfigStore<SqliteKvStore>;

impl<K: KvStore> LocalConfigStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Remove the stored document; the next load seeds defaults again.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.kv.delete(CONFIG_KEY).await
    }
}

impl<K: KvStore> ConfigStore for LocalConfigStore<K> {
    async fn load(&self) -> Result<Option<ChatConfig>, StoreError> {
        match self.kv.get(CONFIG_KEY).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, config: &ChatConfig) -> Result<(), StoreError> {
        let value = serde_json::to_value(config)?;
        self.kv.set(CONFIG_KEY, &value).await
    }

    fn describe(&self) -> String {
        "local storage".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use chathub_types::chat::default_config;

    async fn test_store() -> (tempfile::TempDir, SqliteConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open_in(dir.path()).await.unwrap();
        (dir, LocalConfigStore::new(SqliteKvStore::new(pool)))
    }

    #[tokio::test]
    async fn test_load_empty_returns_none() {
        let (_dir, store) = test_store().await;
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let (_dir, store) = test_store().await;
        let mut config = default_config();
        config.title = "Saved".to_string();

        store.save(&config).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(config));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_corrupt_document_is_serialization_error() {
        let (_dir, store) = test_store().await;
        store
            .kv
            .set(CONFIG_KEY, &serde_json::json!({"chats": "not a list"}))
            .await
            .unwrap();

        assert!(matches!(store.load().await, Err(StoreError::Serialization(_))));
    }
}
