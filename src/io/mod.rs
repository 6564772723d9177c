//! Input/output: layout tokens, image export, share links, scripts and the CLI

/// Command-line interface
pub mod cli;
/// Layout token encoding
pub mod codec;
/// Constants for geometry, sharing, export and serving
pub mod configuration;
/// Error types
pub mod error;
/// PNG export
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Batch export progress bars
pub mod progress;
/// Scripted editing sessions
pub mod script;
/// Share links and clipboard fallbacks
pub mod share;
