//! Data directory layout for Chathub.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CHATHUB_DATA_DIR` environment variable
/// 2. `~/.chathub` in the user's home directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHATHUB_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chathub");
    }

    // Last resort: current directory
    PathBuf::from(".chathub")
}

/// Path of the settings file inside `data_dir`.
pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Default JSON file for the `file` backend.
pub fn default_config_file(data_dir: &Path) -> PathBuf {
    data_dir.join("chat_config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let dir = Path::new("/data/hub");
        assert_eq!(settings_path(dir), PathBuf::from("/data/hub/config.toml"));
        assert_eq!(default_config_file(dir), PathBuf::from("/data/hub/chat_config.json"));
    }

    #[test]
    fn test_resolve_data_dir_is_not_empty() {
        assert!(!resolve_data_dir().as_os_str().is_empty());
    }
}
