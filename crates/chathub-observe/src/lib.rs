//! Observability setup for Chathub: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
