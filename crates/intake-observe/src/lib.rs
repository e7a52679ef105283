//! Observability setup for intake: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
