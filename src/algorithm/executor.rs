//! End-to-end mosaic generation
//!
//! Pipeline: the target's cell colors and the candidate tiles are computed concurrently,
//! a color index is built over the tiles, the assignment engine matches tiles to cells,
//! and the compositor stitches the result, which is written in one step at the end.
//! Every failure aborts the run before anything is written.

use crate::algorithm::assignment::AssignmentEngine;
use crate::analysis::digest::TileSet;
use crate::analysis::regions::RegionColors;
use crate::io::configuration::{DEFAULT_TILE_SIZE, DEFAULT_TOP_K};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{compose_mosaic, load_target, write_mosaic};
use crate::io::progress::{NoProgress, Phase, ProgressEvent, ProgressSink};
use crate::spatial::grid::GridGeometry;
use crate::spatial::index::ColorIndex;
use log::info;
use std::path::{Path, PathBuf};

/// Inputs and tuning parameters of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicRequest {
    /// Image the mosaic approximates
    pub target: PathBuf,
    /// Directory scanned (non-recursively) for candidate photos
    pub tile_directory: PathBuf,
    /// Where the mosaic is written
    pub output: PathBuf,
    /// Side length of one cell and tile in pixels
    pub tile_size: u32,
    /// Number of nearest tiles drawn from per cell
    pub top_k: usize,
    /// Seed for the random tile choices; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl MosaicRequest {
    /// Create a request with default tile size and candidate count
    pub fn new(
        target: impl Into<PathBuf>,
        tile_directory: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            target: target.into(),
            tile_directory: tile_directory.into(),
            output: output.into(),
            tile_size: DEFAULT_TILE_SIZE,
            top_k: DEFAULT_TOP_K,
            seed: None,
        }
    }

    /// Set the cell side length in pixels
    #[must_use]
    pub const fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set how many nearest tiles each cell draws from
    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Fix the random seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check parameters before any work is done
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` or `top_k` is zero
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be positive",
            ));
        }
        if self.top_k == 0 {
            return Err(invalid_parameter("top_k", &self.top_k, &"must be positive"));
        }
        Ok(())
    }
}

/// Result of a successful generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicOutcome {
    /// Where the mosaic was written
    pub output_path: PathBuf,
    /// Whether tiles had to be reused because there were fewer tiles than cells
    pub duplicates_used: bool,
    /// Grid the mosaic was built on
    pub grid: GridGeometry,
    /// Number of tiles in the candidate pool
    pub tile_count: usize,
    /// Candidate files that failed to decode
    pub skipped_candidates: usize,
}

/// Generate a mosaic without progress reporting
///
/// # Errors
///
/// See [`generate_with_progress`]
pub fn generate(request: &MosaicRequest) -> Result<MosaicOutcome> {
    generate_with_progress(request, &mut NoProgress)
}

/// Generate a mosaic, reporting coarse progress to `progress`
///
/// # Errors
///
/// Returns an error if:
/// - A parameter is invalid or the target is smaller than one tile
/// - The target image is missing or undecodable
/// - The tile directory cannot be read or holds no decodable photos
/// - The mosaic cannot be written
pub fn generate_with_progress(
    request: &MosaicRequest,
    progress: &mut dyn ProgressSink,
) -> Result<MosaicOutcome> {
    request.validate()?;

    let (regions, tiles) = rayon::join(
        || reduce_target(&request.target, request.tile_size),
        || TileSet::from_directory(&request.tile_directory, request.tile_size, progress),
    );
    let regions = regions?;
    let tiles = tiles?;

    let grid = regions.geometry();
    info!(
        "Matching {} tiles to a {}x{} grid",
        tiles.len(),
        grid.cols,
        grid.rows
    );

    let index = ColorIndex::new(tiles.colors());
    let mut engine = AssignmentEngine::new(&index, tiles.colors(), request.top_k, request.seed)?;
    let assignment = engine.assign(regions.colors(), progress);

    progress.report(ProgressEvent {
        phase: Phase::Composing,
        completed: 0,
        total: 1,
    });
    let mosaic = compose_mosaic(&assignment, tiles.images(), &grid)?;
    write_mosaic(&mosaic, &request.output)?;
    progress.report(ProgressEvent {
        phase: Phase::Composing,
        completed: 1,
        total: 1,
    });

    info!(
        "Mosaic written to {} ({} distinct tiles)",
        request.output.display(),
        assignment.distinct_tiles()
    );

    Ok(MosaicOutcome {
        output_path: request.output.clone(),
        duplicates_used: assignment.duplicates_used(),
        grid,
        tile_count: tiles.len(),
        skipped_candidates: tiles.skipped(),
    })
}

fn reduce_target(path: &Path, tile_size: u32) -> Result<RegionColors> {
    let target = load_target(path)?;
    RegionColors::from_image(&target, tile_size)
}
