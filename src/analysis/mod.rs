//! Reduction of images to representative colors

/// Candidate photo discovery and tile digests
pub mod digest;
/// Per-cell average colors of the target image
pub mod regions;
