//! Storage abstractions for Chathub.
//!
//! Defines traits for whole-config persistence and the key-value store the
//! local backend is built on. Implementations live in chathub-infra.

pub mod config_store;
pub mod kv_store;
