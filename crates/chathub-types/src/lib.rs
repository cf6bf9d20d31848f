//! Shared domain types for Chathub.
//!
//! This crate contains the domain types used across the Chathub workspace:
//! chat entries, the directory config aggregate, view filters, settings and
//! their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod filter;
pub mod settings;
