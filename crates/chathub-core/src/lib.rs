//! Business logic and storage trait definitions for Chathub.
//!
//! This crate defines the "ports" (storage traits) that the infrastructure
//! layer implements, plus the directory service that owns the chat list and
//! its filters. It depends only on `chathub-types` -- never on
//! `chathub-infra` or any database/IO crate.

pub mod service;
pub mod storage;
