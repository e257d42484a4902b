//! Input/output: command line, configuration, errors, logging and file output

/// Command-line parsing and the session driver
pub mod cli;
/// Generation constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Pixel rendering and PNG export
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// YAML metadata files
pub mod metadata;
/// Color modes and palettes
pub mod palette;
/// Attempt progress bar
pub mod progress;
