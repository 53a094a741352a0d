//! Tracing/logging setup shared by binaries.

/// Initialize process-wide tracing from the environment.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&ObservabilityConfig::from_env());
}

/// Environment-driven configuration.
pub mod config;

/// Tracing subscriber wiring (filters, formats).
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};
