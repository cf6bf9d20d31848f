//! Directory service.
//!
//! Owns the chat directory, the active view filters and the load/error state.
//! Every mutation is applied to the in-memory config first and then written
//! through the configured `ConfigStore`. A failed write keeps the local change,
//! records the error and returns it to the caller.

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use chathub_types::chat::{
    ChatConfig, ChatItem, ChatUpdate, NewChat, Theme, default_config, new_chat_id, non_empty,
};
use chathub_types::error::{DirectoryError, StoreError};
use chathub_types::filter::ChatFilter;

use crate::storage::config_store::ConfigStore;

/// Mutable state guarded by the service lock.
#[derive(Debug)]
struct DirectoryState {
    config: ChatConfig,
    filter: ChatFilter,
    loading: bool,
    error: Option<String>,
    /// Whether `config` reflects the store. False until a load succeeds.
    synced: bool,
}

/// Point-in-time copy of everything a view needs to render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryView {
    pub config: ChatConfig,
    /// `config.chats` narrowed by `filter`, in config order.
    pub filtered: Vec<ChatItem>,
    pub categories: Vec<String>,
    pub filter: ChatFilter,
    pub loading: bool,
    pub error: Option<String>,
}

/// Service owning the chat directory.
///
/// Generic over the `ConfigStore` so chathub-core never depends on
/// chathub-infra. Safe to share across tasks behind an `Arc`.
pub struct DirectoryService<S: ConfigStore> {
    store: S,
    state: RwLock<DirectoryState>,
    /// Serializes mutate-then-save so saves land in mutation order.
    write_lock: Mutex<()>,
}

impl<S: ConfigStore> DirectoryService<S> {
    /// Create a service over `store`. The directory starts with the default
    /// config in the loading state until `load` is called.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: RwLock::new(DirectoryState {
                config: default_config(),
                filter: ChatFilter::default(),
                loading: true,
                error: None,
                synced: false,
            }),
            write_lock: Mutex::new(()),
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Loading ---

    /// Load the directory from the store.
    ///
    /// - Nothing stored: seeds the default config and saves it.
    /// - Store error or invalid document: keeps the default config, records
    ///   the error and returns it. Edits are refused until a later load or
    ///   `replace_config` succeeds, so the defaults never overwrite the store.
    pub async fn load(&self) -> Result<(), DirectoryError> {
        let _guard = self.write_lock.lock().await;
        self.load_locked().await
    }

    /// `load` body. Callers must hold `write_lock`.
    async fn load_locked(&self) -> Result<(), DirectoryError> {
        let result = match self.store.load().await {
            Ok(Some(config)) => match config.validate() {
                Ok(()) => Ok(config),
                Err(id) => Err(DirectoryError::Storage(StoreError::InvalidConfig(format!(
                    "duplicate chat id '{id}'"
                )))),
            },
            Ok(None) => {
                info!(store = %self.store.describe(), "No stored directory, seeding defaults");
                let config = default_config();
                self.store
                    .save(&config)
                    .await
                    .map(|()| config)
                    .map_err(DirectoryError::from)
            }
            Err(e) => Err(e.into()),
        };

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(config) => {
                debug!(chats = config.chats.len(), "Directory loaded");
                state.config = config;
                state.error = None;
                state.synced = true;
                Ok(())
            }
            Err(e) => {
                warn!(store = %self.store.describe(), "Failed to load directory: {e}");
                state.config = default_config();
                state.error = Some(format!("Failed to load chat configuration: {e}"));
                state.synced = false;
                Err(e)
            }
        }
    }

    // --- Reads ---

    pub async fn snapshot(&self) -> DirectoryView {
        let state = self.state.read().await;
        DirectoryView {
            filtered: state.filter.apply(&state.config),
            categories: state.config.category_names(),
            config: state.config.clone(),
            filter: state.filter.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    pub async fn config(&self) -> ChatConfig {
        self.state.read().await.config.clone()
    }

    /// Chats matching the active filters.
    pub async fn filtered_chats(&self) -> Vec<ChatItem> {
        let state = self.state.read().await;
        state.filter.apply(&state.config)
    }

    /// Chats matching an explicit filter, leaving the active filters untouched.
    pub async fn query(&self, filter: &ChatFilter) -> Vec<ChatItem> {
        filter.apply(&self.state.read().await.config)
    }

    pub async fn categories(&self) -> Vec<String> {
        self.state.read().await.config.category_names()
    }

    pub async fn get_chat(&self, id: &str) -> Result<ChatItem, DirectoryError> {
        self.state
            .read()
            .await
            .config
            .find(id)
            .cloned()
            .ok_or_else(|| DirectoryError::ChatNotFound(id.to_string()))
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    // --- Filters ---

    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.state.write().await.filter.query = query.into();
    }

    /// Set the category filter. `None` (or an empty name) shows all categories.
    pub async fn set_active_category(&self, category: Option<String>) {
        self.state.write().await.filter.category = non_empty(category);
    }

    pub async fn set_show_favorites(&self, favorites_only: bool) {
        self.state.write().await.filter.favorites_only = favorites_only;
    }

    pub async fn reset_filters(&self) {
        self.state.write().await.filter.reset();
    }

    pub async fn filter(&self) -> ChatFilter {
        self.state.read().await.filter.clone()
    }

    // --- Chats ---

    /// Add a new chat. Name and URL are required; the id is generated when
    /// not supplied.
    pub async fn add_chat(&self, new_chat: NewChat) -> Result<ChatItem, DirectoryError> {
        let name = new_chat.name.trim().to_string();
        let url = new_chat.url.trim().to_string();
        if name.is_empty() || url.is_empty() {
            return Err(DirectoryError::Validation(
                "chat name and URL are required".to_string(),
            ));
        }

        let item = ChatItem {
            id: non_empty(new_chat.id).unwrap_or_else(new_chat_id),
            name,
            description: new_chat.description.trim().to_string(),
            url,
            icon: non_empty(new_chat.icon),
            category: non_empty(new_chat.category),
            favorite: false,
            last_visited: None,
        };

        let added = self
            .mutate(move |state| {
                if state.config.find(&item.id).is_some() {
                    return Err(DirectoryError::DuplicateChatId(item.id));
                }
                state.config.chats.push(item.clone());
                Ok(item)
            })
            .await?;

        info!(id = %added.id, name = %added.name, "Chat added");
        Ok(added)
    }

    /// Apply a partial edit to a chat.
    pub async fn update_chat(
        &self,
        id: &str,
        update: ChatUpdate,
    ) -> Result<ChatItem, DirectoryError> {
        let id = id.to_string();
        self.mutate(move |state| {
            let chat = state
                .config
                .find_mut(&id)
                .ok_or_else(|| DirectoryError::ChatNotFound(id.clone()))?;

            let mut edited = chat.clone();
            if let Some(name) = update.name {
                let trimmed = name.trim().to_string();
                if trimmed.is_empty() {
                    return Err(DirectoryError::Validation(
                        "chat name cannot be empty".to_string(),
                    ));
                }
                edited.name = trimmed;
            }
            if let Some(url) = update.url {
                let trimmed = url.trim().to_string();
                if trimmed.is_empty() {
                    return Err(DirectoryError::Validation(
                        "chat URL cannot be empty".to_string(),
                    ));
                }
                edited.url = trimmed;
            }
            if let Some(description) = update.description {
                edited.description = description.trim().to_string();
            }
            if update.icon.is_some() {
                edited.icon = non_empty(update.icon);
            }
            if update.category.is_some() {
                edited.category = non_empty(update.category);
            }
            if let Some(favorite) = update.favorite {
                edited.favorite = favorite;
            }

            *chat = edited.clone();
            Ok(edited)
        })
        .await
    }

    /// Remove a chat and return it.
    pub async fn delete_chat(&self, id: &str) -> Result<ChatItem, DirectoryError> {
        let id = id.to_string();
        let removed = self
            .mutate(move |state| {
                let index = state
                    .config
                    .chats
                    .iter()
                    .position(|c| c.id == id)
                    .ok_or_else(|| DirectoryError::ChatNotFound(id.clone()))?;
                Ok(state.config.chats.remove(index))
            })
            .await?;

        info!(id = %removed.id, "Chat deleted");
        Ok(removed)
    }

    pub async fn toggle_favorite(&self, id: &str) -> Result<ChatItem, DirectoryError> {
        let id = id.to_string();
        self.mutate(move |state| {
            let chat = state
                .config
                .find_mut(&id)
                .ok_or_else(|| DirectoryError::ChatNotFound(id.clone()))?;
            chat.favorite = !chat.favorite;
            Ok(chat.clone())
        })
        .await
    }

    /// Stamp the chat's last-visited time with now.
    pub async fn record_visit(&self, id: &str) -> Result<ChatItem, DirectoryError> {
        let id = id.to_string();
        self.mutate(move |state| {
            let chat = state
                .config
                .find_mut(&id)
                .ok_or_else(|| DirectoryError::ChatNotFound(id.clone()))?;
            chat.last_visited = Some(Utc::now());
            Ok(chat.clone())
        })
        .await
    }

    /// Record a visit and return the URL to open.
    pub async fn launch(&self, id: &str) -> Result<String, DirectoryError> {
        let chat = self.record_visit(id).await?;
        debug!(id = %chat.id, url = %chat.url, "Launching chat");
        Ok(chat.url)
    }

    // --- Categories ---

    /// Add a category. Materializes the derived list if the config had none.
    pub async fn add_category(&self, name: &str) -> Result<Vec<String>, DirectoryError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DirectoryError::Validation(
                "category name cannot be empty".to_string(),
            ));
        }

        self.mutate(move |state| {
            let mut names = state.config.category_names();
            if names.contains(&name) {
                return Err(DirectoryError::CategoryExists(name));
            }
            names.push(name);
            state.config.categories = Some(names.clone());
            Ok(names)
        })
        .await
    }

    /// Rename a category, carrying dependent chats and the active filter along.
    pub async fn rename_category(
        &self,
        old: &str,
        new: &str,
    ) -> Result<Vec<String>, DirectoryError> {
        let old = old.to_string();
        let new = new.trim().to_string();
        if new.is_empty() {
            return Err(DirectoryError::Validation(
                "category name cannot be empty".to_string(),
            ));
        }

        self.mutate(move |state| {
            let mut names = state.config.category_names();
            let index = names
                .iter()
                .position(|c| *c == old)
                .ok_or_else(|| DirectoryError::CategoryNotFound(old.clone()))?;
            if new != old && names.contains(&new) {
                return Err(DirectoryError::CategoryExists(new));
            }

            names[index] = new.clone();
            state.config.categories = Some(names.clone());
            for chat in &mut state.config.chats {
                if chat.category.as_deref() == Some(old.as_str()) {
                    chat.category = Some(new.clone());
                }
            }
            if state.filter.category.as_deref() == Some(old.as_str()) {
                state.filter.category = Some(new);
            }
            Ok(names)
        })
        .await
    }

    /// Delete a category. Chats that used it become uncategorized.
    pub async fn delete_category(&self, name: &str) -> Result<Vec<String>, DirectoryError> {
        let name = name.to_string();
        self.mutate(move |state| {
            let mut names = state.config.category_names();
            if !names.contains(&name) {
                return Err(DirectoryError::CategoryNotFound(name));
            }

            names.retain(|c| *c != name);
            state.config.categories = Some(names.clone());
            let mut cleared = 0usize;
            for chat in &mut state.config.chats {
                if chat.category.as_deref() == Some(name.as_str()) {
                    chat.category = None;
                    cleared += 1;
                }
            }
            if state.filter.category.as_deref() == Some(name.as_str()) {
                state.filter.category = None;
            }
            debug!(category = %name, cleared, "Category deleted");
            Ok(names)
        })
        .await
    }

    // --- Config ---

    pub async fn set_title(&self, title: &str) -> Result<ChatConfig, DirectoryError> {
        self.update_display(Some(title), None).await
    }

    /// Set the title and/or theme in one save. Nothing changes if the title
    /// is blank.
    pub async fn update_display(
        &self,
        title: Option<&str>,
        theme: Option<Theme>,
    ) -> Result<ChatConfig, DirectoryError> {
        let title = match title.map(str::trim) {
            Some("") => {
                return Err(DirectoryError::Validation("title cannot be empty".to_string()));
            }
            other => other.map(str::to_string),
        };
        self.mutate(move |state| {
            if let Some(title) = title {
                state.config.title = title;
            }
            if let Some(theme) = theme {
                state.config.theme = theme;
            }
            Ok(state.config.clone())
        })
        .await
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<ChatConfig, DirectoryError> {
        self.mutate(move |state| {
            state.config.theme = theme;
            Ok(state.config.clone())
        })
        .await
    }

    pub async fn toggle_theme(&self) -> Result<Theme, DirectoryError> {
        self.mutate(|state| {
            state.config.theme = state.config.theme.toggled();
            Ok(state.config.theme)
        })
        .await
    }

    /// Replace the whole directory (import, or a client posting its config).
    pub async fn replace_config(&self, config: ChatConfig) -> Result<ChatConfig, DirectoryError> {
        config.validate().map_err(DirectoryError::DuplicateChatId)?;
        let replaced = self
            .apply_and_save(false, move |state| {
                state.config = config;
                state.synced = true;
                Ok(state.config.clone())
            })
            .await?;
        info!(chats = replaced.chats.len(), "Directory replaced");
        Ok(replaced)
    }

    // --- Internals ---

    /// Apply `f` to the state, then persist the resulting config.
    ///
    /// `f` returning an error leaves the state untouched and skips the save.
    async fn mutate<T, F>(&self, f: F) -> Result<T, DirectoryError>
    where
        F: FnOnce(&mut DirectoryState) -> Result<T, DirectoryError>,
    {
        self.apply_and_save(true, f).await
    }

    /// With `require_synced`, a directory whose last load failed is reloaded
    /// first; if that fails too the edit is refused without saving.
    async fn apply_and_save<T, F>(&self, require_synced: bool, f: F) -> Result<T, DirectoryError>
    where
        F: FnOnce(&mut DirectoryState) -> Result<T, DirectoryError>,
    {
        let _guard = self.write_lock.lock().await;

        if require_synced && !self.state.read().await.synced {
            debug!("Directory not loaded from storage, reloading before edit");
            if let Err(e) = self.load_locked().await {
                return Err(DirectoryError::Storage(StoreError::Unavailable(format!(
                    "chat configuration was not loaded, refusing to overwrite it: {e}"
                ))));
            }
        }

        let (value, snapshot) = {
            let mut state = self.state.write().await;
            let value = f(&mut state)?;
            (value, state.config.clone())
        };

        match self.store.save(&snapshot).await {
            Ok(()) => {
                self.state.write().await.error = None;
                Ok(value)
            }
            Err(e) => {
                warn!(store = %self.store.describe(), "Failed to persist directory: {e}");
                self.state.write().await.error =
                    Some(format!("Failed to save chat configuration: {e}"));
                Err(e.into())
            }
        }
    }
}
