//! Mathematical utilities for color matching

/// LAB conversion and color distance
pub mod color;
