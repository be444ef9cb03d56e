//! Spatial data structures
//!
//! This module contains:
//! - Cell geometry of the cropped target
//! - The nearest-neighbor index over tile colors

/// Cell geometry of the cropped target
pub mod grid;
/// Exact k-nearest tile lookup by color
pub mod index;

pub use grid::GridGeometry;
pub use index::ColorIndex;
