//! HTTP/REST API layer for Chathub.
//!
//! Axum-based REST API: the raw `/api/config` document endpoint plus the
//! envelope-wrapped `/api/v1/` routes, with CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
