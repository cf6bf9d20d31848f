//! Application state wiring the directory service to its storage backend.
//!
//! AppState holds the concrete service instance used by both CLI and REST API.
//! `DirectoryService` is generic over the `ConfigStore` trait, but AppState
//! pins it to `AnyConfigStore`, the backend chosen in settings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chathub_core::service::directory::DirectoryService;
use chathub_infra::config::load_settings;
use chathub_infra::store::{open_config_store, AnyConfigStore};
use chathub_types::error::DirectoryError;
use chathub_types::settings::Settings;

/// Concrete type alias for the service generic pinned to the runtime backend.
pub type ConcreteDirectoryService = DirectoryService<AnyConfigStore>;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<ConcreteDirectoryService>,
    pub settings: Arc<Settings>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Read settings from `data_dir` and open the configured backend.
    ///
    /// The directory is not loaded yet; call [`AppState::load`].
    pub async fn init(data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;
        let settings = load_settings(data_dir).await;
        Self::with_settings(settings, data_dir).await
    }

    /// Open the backend named by `settings` without reading `config.toml`.
    pub async fn with_settings(settings: Settings, data_dir: &Path) -> anyhow::Result<Self> {
        let store = open_config_store(&settings.storage, data_dir).await?;

        Ok(Self {
            directory: Arc::new(DirectoryService::new(store)),
            settings: Arc::new(settings),
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Load the directory from the backend (seeding defaults on first run).
    pub async fn load(&self) -> Result<(), DirectoryError> {
        self.directory.load().await
    }
}
