//! Infrastructure layer for Chathub.
//!
//! Contains implementations of the storage traits defined in `chathub-core`:
//! SQLite key-value storage, the JSON file backend with export/import, the
//! remote HTTP backend with local fallback, plus settings loading.

pub mod config;
pub mod file;
pub mod filesystem;
pub mod local;
pub mod remote;
pub mod sqlite;
pub mod store;
