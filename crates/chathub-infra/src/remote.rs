//! Remote HTTP backend with local fallback.
//!
//! `RemoteConfigStore` talks to a server exposing `GET /api/config` and
//! `POST /api/config` (the endpoint `chub serve` provides). `FallbackStore`
//! pairs it with a local store so the directory stays usable offline.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use chathub_core::storage::config_store::ConfigStore;
use chathub_types::chat::ChatConfig;
use chathub_types::error::StoreError;

/// Path of the config endpoint relative to the base URL.
const CONFIG_PATH: &str = "/api/config";

/// `ConfigStore` backed by a remote `/api/config` endpoint.
#[derive(Clone)]
pub struct RemoteConfigStore {
    base_url: String,
    http: reqwest::Client,
}

impl RemoteConfigStore {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("chathub/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{CONFIG_PATH}", self.base_url)
    }
}

impl ConfigStore for RemoteConfigStore {
    async fn load(&self) -> Result<Option<ChatConfig>, StoreError> {
        let url = self.endpoint();
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("GET {url}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StoreError::Http(format!("GET {url} returned {status}")));
        }

        let config = response
            .json::<ChatConfig>()
            .await
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        debug!(chats = config.chats.len(), "Loaded directory from {url}");
        Ok(Some(config))
    }

    async fn save(&self, config: &ChatConfig) -> Result<(), StoreError> {
        let url = self.endpoint();
        let response = self
            .http
            .post(&url)
            .json(config)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("POST {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Http(format!("POST {url} returned {status}")));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("remote {}", self.endpoint())
    }
}

/// Primary store with a fallback.
///
/// - `load`: the primary's config when it has one (mirrored into the
///   fallback). When the primary is empty the fallback's config is used and
///   pushed back to the primary; when it fails the fallback's is used as is.
/// - `save`: written to both. A primary failure is logged and tolerated; a
///   fallback failure is returned.
pub struct FallbackStore<P: ConfigStore, F: ConfigStore> {
    primary: P,
    fallback: F,
}

impl<P: ConfigStore, F: ConfigStore> FallbackStore<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

impl<P: ConfigStore, F: ConfigStore> ConfigStore for FallbackStore<P, F> {
    async fn load(&self) -> Result<Option<ChatConfig>, StoreError> {
        match self.primary.load().await {
            Ok(Some(config)) => {
                if let Err(e) = self.fallback.save(&config).await {
                    warn!(fallback = %self.fallback.describe(), "Failed to mirror directory: {e}");
                }
                Ok(Some(config))
            }
            Ok(None) => match self.fallback.load().await? {
                Some(config) => {
                    info!(
                        primary = %self.primary.describe(),
                        "Primary store empty, restoring from fallback"
                    );
                    if let Err(e) = self.primary.save(&config).await {
                        warn!(primary = %self.primary.describe(), "Failed to restore primary: {e}");
                    }
                    Ok(Some(config))
                }
                None => Ok(None),
            },
            Err(e) => {
                warn!(
                    primary = %self.primary.describe(),
                    fallback = %self.fallback.describe(),
                    "Primary store failed, loading from fallback: {e}"
                );
                self.fallback.load().await
            }
        }
    }

    async fn save(&self, config: &ChatConfig) -> Result<(), StoreError> {
        if let Err(e) = self.primary.save(config).await {
            warn!(primary = %self.primary.describe(), "Primary store save failed: {e}");
        }
        self.fallback.save(config).await
    }

    fn describe(&self) -> String {
        format!(
            "{} (fallback: {})",
            self.primary.describe(),
            self.fallback.describe()
        )
    }
}
