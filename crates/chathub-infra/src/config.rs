//! Settings loader for Chathub.
//!
//! Reads `config.toml` from the data directory (`~/.chathub/` by default) and
//! deserializes it into [`Settings`]. Falls back to defaults when the file is
//! missing or malformed. `CHATHUB_BACKEND` and `CHATHUB_REMOTE_URL` override
//! the storage section.

use std::path::Path;

use chathub_types::settings::{Settings, StorageBackend};

use crate::filesystem::settings_path;

/// Load settings from `{data_dir}/config.toml`, then apply env overrides.
pub async fn load_settings(data_dir: &Path) -> Settings {
    let settings = read_settings_file(data_dir).await;
    apply_overrides(
        settings,
        std::env::var("CHATHUB_BACKEND").ok(),
        std::env::var("CHATHUB_REMOTE_URL").ok(),
    )
}

/// Parse the settings file.
///
/// - If the file does not exist, returns [`Settings::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn read_settings_file(data_dir: &Path) -> Settings {
    let path = settings_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return Settings::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return Settings::default();
        }
    };

    match toml::from_str::<Settings>(&content) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            Settings::default()
        }
    }
}

/// Apply storage overrides. An unparseable backend name is ignored with a warning.
pub fn apply_overrides(
    mut settings: Settings,
    backend: Option<String>,
    remote_url: Option<String>,
) -> Settings {
    if let Some(name) = backend {
        match name.parse::<StorageBackend>() {
            Ok(backend) => settings.storage.backend = backend,
            Err(err) => tracing::warn!("Ignoring CHATHUB_BACKEND: {err}"),
        }
    }
    if let Some(url) = remote_url.filter(|u| !u.trim().is_empty()) {
        settings.storage.remote_url = Some(url);
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn read_settings_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let settings = read_settings_file(tmp.path()).await;
        assert_eq!(settings.storage.backend, StorageBackend::Local);
        assert_eq!(settings.server.port, 8000);
    }

    #[tokio::test]
    async fn read_settings_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            settings_path(tmp.path()),
            r#"
[storage]
backend = "file"
file_path = "/srv/hub/chats.json"
"#,
        )
        .await
        .unwrap();

        let settings = read_settings_file(tmp.path()).await;
        assert_eq!(settings.storage.backend, StorageBackend::File);
        assert_eq!(
            settings.storage.file_path.as_deref(),
            Some(Path::new("/srv/hub/chats.json"))
        );
    }

    #[tokio::test]
    async fn read_settings_malformed_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(settings_path(tmp.path()), "[storage\nbackend = ")
            .await
            .unwrap();

        let settings = read_settings_file(tmp.path()).await;
        assert_eq!(settings.storage.backend, StorageBackend::Local);
    }

    #[test]
    fn apply_overrides_sets_backend_and_url() {
        let settings = apply_overrides(
            Settings::default(),
            Some("remote".to_string()),
            Some("http://hub:8000".to_string()),
        );
        assert_eq!(settings.storage.backend, StorageBackend::Remote);
        assert_eq!(settings.storage.remote_url.as_deref(), Some("http://hub:8000"));
    }

    #[test]
    fn apply_overrides_ignores_invalid_values() {
        let settings = apply_overrides(
            Settings::default(),
            Some("ftp".to_string()),
            Some("  ".to_string()),
        );
        assert_eq!(settings.storage.backend, StorageBackend::Local);
        assert!(settings.storage.remote_url.is_none());
    }
}
