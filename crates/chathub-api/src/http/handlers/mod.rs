//! HTTP request handlers for the REST API.

pub mod category;
pub mod chat;
pub mod config;
pub mod settings;
