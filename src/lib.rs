//! Photo mosaic generation
//!
//! A target image is partitioned into a grid of square cells, every candidate photo is
//! reduced to a tile and a representative color, and tiles are assigned to cells so that
//! each cell's tile approximates its color while using as many distinct photos as
//! possible. Matching happens in CIE LAB; the output keeps the photos' original colors.

#![forbid(unsafe_code)]

/// Tile-to-cell assignment and the end-to-end generation pipeline
pub mod algorithm;
/// Color reduction of targets and candidate photos
pub mod analysis;
/// Input/output, progress reporting and error handling
pub mod io;
/// Color space conversion and distance
pub mod math;
/// Grid geometry and nearest-color lookup
pub mod spatial;

pub use algorithm::executor::{MosaicOutcome, MosaicRequest, generate, generate_with_progress};
pub use io::error::{MosaicError, Result};
