//! Input/output operations and error handling

/// Command-line interface
pub mod cli;
/// Defaults and tuning constants
pub mod configuration;
/// Error types
pub mod error;
/// Target loading, composition and output writing
pub mod image;
/// Progress reporting side channel
pub mod progress;
