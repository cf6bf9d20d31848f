//! Backend selection.
//!
//! `AnyConfigStore` lets the application pick a backend at runtime from
//! [`StorageSettings`] while `DirectoryService` stays monomorphic.

use std::path::Path;
use std::time::Duration;

use chathub_core::storage::config_store::ConfigStore;
use chathub_types::chat::ChatConfig;
use chathub_types::error::StoreError;
use chathub_types::settings::{StorageBackend, StorageSettings};

use crate::file::JsonFileStore;
use crate::filesystem::default_config_file;
use crate::local::{LocalConfigStore, SqliteConfigStore};
use crate::remote::{FallbackStore, RemoteConfigStore};
use crate::sqlite::kv::SqliteKvStore;
use crate::sqlite::pool::DatabasePool;

/// One of the configured persistence backends.
pub enum AnyConfigStore {
    Local(SqliteConfigStore),
    File(JsonFileStore),
    Remote(FallbackStore<RemoteConfigStore, SqliteConfigStore>),
}

impl AnyConfigStore {
    pub fn backend(&self) -> StorageBackend {
        match self {
            AnyConfigStore::Local(_) => StorageBackend::Local,
            AnyConfigStore::File(_) => StorageBackend::File,
            AnyConfigStore::Remote(_) => StorageBackend::Remote,
        }
    }
}

impl ConfigStore for AnyConfigStore {
    async fn load(&self) -> Result<Option<ChatConfig>, StoreError> {
        match self {
            AnyConfigStore::Local(store) => store.load().await,
            AnyConfigStore::File(store) => store.load().await,
            AnyConfigStore::Remote(store) => store.load().await,
        }
    }

    async fn save(&self, config: &ChatConfig) -> Result<(), StoreError> {
        match self {
            AnyConfigStore::Local(store) => store.save(config).await,
            AnyConfigStore::File(store) => store.save(config).await,
            AnyConfigStore::Remote(store) => store.save(config).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            AnyConfigStore::Local(store) => store.describe(),
            AnyConfigStore::File(store) => store.describe(),
            AnyConfigStore::Remote(store) => store.describe(),
        }
    }
}

async fn open_local(data_dir: &Path) -> Result<SqliteConfigStore, StoreError> {
    let pool = DatabasePool::open_in(data_dir)
        .await
        .map_err(|e| StoreError::Unavailable(format!("local database: {e}")))?;
    Ok(LocalConfigStore::new(SqliteKvStore::new(pool)))
}

/// Open the backend selected by `settings`. The SQLite database is only
/// created for backends that use it.
pub async fn open_config_store(
    settings: &StorageSettings,
    data_dir: &Path,
) -> Result<AnyConfigStore, StoreError> {
    let store = match settings.backend {
        StorageBackend::Local => AnyConfigStore::Local(open_local(data_dir).await?),
        StorageBackend::File => {
            let path = settings
                .file_path
                .clone()
                .unwrap_or_else(|| default_config_file(data_dir));
            AnyConfigStore::File(JsonFileStore::new(path))
        }
        StorageBackend::Remote => {
            let url = settings.remote_url.as_deref().ok_or_else(|| {
                StoreError::InvalidConfig(
                    "storage.remote_url is required for the remote backend".to_string(),
                )
            })?;
            let remote =
                RemoteConfigStore::new(url, Duration::from_secs(settings.remote_timeout_secs));
            AnyConfigStore::Remote(FallbackStore::new(remote, open_local(data_dir).await?))
        }
    };

    tracing::debug!(backend = %store.backend(), store = %store.describe(), "Config store opened");
    Ok(store)
}
