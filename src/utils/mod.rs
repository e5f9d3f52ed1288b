//! Configuration and process setup utilities.

/// Tracing subscriber setup.
pub mod logging;
/// TOML configuration loading.
pub mod toml_config;
