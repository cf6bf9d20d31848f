//! JSON file backend, export and import.
//!
//! `JsonFileStore` keeps the directory in a single pretty-printed JSON file.
//! Exports write a dated copy (`chat-config-YYYY-MM-DD.json`) that `import_config`
//! can read back on another machine.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use chathub_core::storage::config_store::ConfigStore;
use chathub_types::chat::ChatConfig;
use chathub_types::error::StoreError;

/// `ConfigStore` over one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileStore {
    async fn load(&self) -> Result<Option<ChatConfig>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}", self.path.display());
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, config: &ChatConfig) -> Result<(), StoreError> {
        write_json_atomic(&self.path, config).await
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Write `config` as pretty JSON via a temp file and rename, creating parent
/// directories as needed.
async fn write_json_atomic(path: &Path, config: &ChatConfig) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(config)?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, json).await?;
    tokio::fs::rename(&tmp_path, path).await?;
    Ok(())
}

/// File name for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("chat-config-{}.json", date.format("%Y-%m-%d"))
}

/// Write a dated export of `config` into `dir`. Returns the written path.
pub async fn export_config(config: &ChatConfig, dir: &Path) -> Result<PathBuf, StoreError> {
    let path = dir.join(export_file_name(chrono::Local::now().date_naive()));
    write_json_atomic(&path, config).await?;
    debug!(chats = config.chats.len(), "Exported directory to {}", path.display());
    Ok(path)
}

/// Read and validate a previously exported directory.
pub async fn import_config(path: &Path) -> Result<ChatConfig, StoreError> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: ChatConfig = serde_json::from_str(&content)?;
    config
        .validate()
        .map_err(|id| StoreError::InvalidConfig(format!("duplicate chat id '{id}'")))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chathub_types::chat::default_config;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("chat_config.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_parents_and_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("chat_config.json");
        let store = JsonFileStore::new(&path);

        store.save(&default_config()).await.unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(store.load().await.unwrap(), Some(default_config()));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  \"title\""), "file should be pretty-printed");
    }

    #[tokio::test]
    async fn test_malformed_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat_config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load().await, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "chat-config-2024-03-07.json");
    }

    #[tokio::test]
    async fn test_export_then_import() {
        let dir = tempdir().unwrap();
        let mut config = default_config();
        config.title = "Exported".to_string();

        let path = export_config(&config, dir.path()).await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("chat-config-") && name.ends_with(".json"));

        let imported = import_config(&path).await.unwrap();
        assert_eq!(imported, config);
    }

    #[tokio::test]
    async fn test_import_rejects_duplicate_ids() {
        let dir = tempdir().unwrap();
        let mut config = default_config();
        config.chats[3].id = "2".to_string();
        let path = dir.path().join("dup.json");
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let err = import_config(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(msg) if msg.contains("'2'")));
    }
}
