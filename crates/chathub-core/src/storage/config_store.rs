//! Config store trait.
//!
//! The persistence boundary of the directory: a backend loads and saves the
//! whole `ChatConfig` document. Local storage, JSON files and the remote
//! endpoint are interchangeable behind this trait.

use chathub_types::chat::ChatConfig;
use chathub_types::error::StoreError;

/// Trait for whole-document persistence of the chat directory.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in chathub-infra.
pub trait ConfigStore: Send + Sync {
    /// Load the stored config. Returns None when nothing has been stored yet.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<ChatConfig>, StoreError>> + Send;

    /// Persist the config, replacing whatever was stored.
    fn save(
        &self,
        config: &ChatConfig,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Short human-readable description of the backend (for logs and status).
    fn describe(&self) -> String;
}
