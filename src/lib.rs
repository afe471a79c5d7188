//! Library exports for the few-shot dataset tools.
/// Split run settings loaded from TOML.
pub mod config;
/// Class-folder scanning and few-shot splitting.
pub mod dataset;
/// Tracing subscriber setup for binaries.
pub mod logging;
