//! Input/output operations, orchestration, and error handling

/// Command-line interface and render orchestration
pub mod cli;
/// Render constants and configuration defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Source loading, adjustment, and canvas export
pub mod image;
/// Fixed palette file loading
pub mod palette;
/// Preview channel and polling display window
pub mod preview;
/// Row progress display
pub mod progress;
