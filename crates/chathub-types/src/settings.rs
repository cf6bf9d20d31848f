//! Application settings for Chathub.
//!
//! `Settings` represents the top-level `config.toml` that selects the
//! persistence backend and configures the HTTP server.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Top-level settings, loaded from `~/.chathub/config.toml`. All fields have
/// sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

/// Which persistence backend holds the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local key-value storage (SQLite).
    Local,
    /// A single JSON file on disk.
    File,
    /// A remote `/api/config` endpoint, falling back to local storage.
    Remote,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "file" => Ok(StorageBackend::File),
            "remote" => Ok(StorageBackend::Remote),
            other => Err(format!("invalid storage backend: '{other}'")),
        }
    }
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::Local
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// JSON file used by the `file` backend. Defaults to
    /// `{data_dir}/chat_config.json`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Base URL of the remote endpoint (e.g. `http://127.0.0.1:8000`).
    #[serde(default)]
    pub remote_url: Option<String>,

    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
}

fn default_remote_timeout_secs() -> u64 {
    10
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            file_path: None,
            remote_url: None,
            remote_timeout_secs: default_remote_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory with a built web front end, served for unknown paths.
    #[serde(default)]
    pub web_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.storage.backend, StorageBackend::Local);
        assert_eq!(settings.storage.remote_timeout_secs, 10);
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn test_settings_deserialize_empty() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.storage.backend, StorageBackend::Local);
        assert!(settings.storage.remote_url.is_none());
        assert_eq!(settings.server.port, 8000);
    }

    #[test]
    fn test_settings_deserialize_with_values() {
        let toml_str = r#"
[storage]
backend = "remote"
remote_url = "http://10.0.0.2:8000"
remote_timeout_secs = 3

[server]
port = 9090
web_dir = "dist"
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.storage.backend, StorageBackend::Remote);
        assert_eq!(settings.storage.remote_url.as_deref(), Some("http://10.0.0.2:8000"));
        assert_eq!(settings.storage.remote_timeout_secs, 3);
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.web_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!("FILE".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert!("s3".parse::<StorageBackend>().is_err());
        assert_eq!(StorageBackend::Remote.to_string(), "remote");
    }
}
