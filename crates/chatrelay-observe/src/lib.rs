//! Observability setup for Chatrelay.
//!
//! Structured logging via `tracing` with optional OpenTelemetry export.

pub mod tracing_setup;
