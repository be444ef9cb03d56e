//! Difficulty-ordered greedy assignment of tiles to grid cells
//!
//! Cells whose best match is worst are resolved first, since they have the fewest good
//! alternatives. Each cell draws uniformly at random from the still-unused tiles among
//! its `top_k` nearest, falling back to a direct scan of every unused tile when all of
//! those are taken. Once every tile has been used, the remaining cells take their
//! globally nearest tile and the assignment is flagged as containing duplicates.

use crate::algorithm::availability::AvailableTiles;
use crate::io::configuration::PROGRESS_STEPS;
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::{Phase, ProgressEvent, ProgressSink, report_interval};
use crate::math::color::LabColor;
use crate::spatial::index::ColorIndex;
use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::{SeedableRng, rngs::StdRng};

/// Tile chosen for every cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    tiles: Vec<usize>,
    duplicates_used: bool,
}

impl Assignment {
    /// Wrap an explicit per-cell tile list
    pub const fn new(tiles: Vec<usize>, duplicates_used: bool) -> Self {
        Self {
            tiles,
            duplicates_used,
        }
    }

    /// Tile index per cell, in row-major cell order
    pub fn tiles(&self) -> &[usize] {
        &self.tiles
    }

    /// Tile assigned to a cell
    pub fn tile_for(&self, region: usize) -> Option<usize> {
        self.tiles.get(region).copied()
    }

    /// Whether some tiles had to be reused because there were fewer tiles than cells
    pub const fn duplicates_used(&self) -> bool {
        self.duplicates_used
    }

    /// Number of distinct tiles used
    pub fn distinct_tiles(&self) -> usize {
        let mut seen = self.tiles.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Number of assigned cells
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no cells were assigned
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Assigns tiles to cells over a prebuilt color index
pub struct AssignmentEngine<'a> {
    index: &'a ColorIndex,
    tile_colors: &'a [LabColor],
    top_k: usize,
    rng: StdRng,
}

impl<'a> AssignmentEngine<'a> {
    /// Create an engine drawing among the `top_k` nearest tiles per cell
    ///
    /// `tile_colors` must be the colors `index` was built from. A `seed` makes the
    /// random choices reproducible; `None` draws a fresh seed from the OS.
    ///
    /// # Errors
    ///
    /// Returns an error if `top_k` is zero
    pub fn new(
        index: &'a ColorIndex,
        tile_colors: &'a [LabColor],
        top_k: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        if top_k == 0 {
            return Err(invalid_parameter("top_k", &top_k, &"must be positive"));
        }

        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        Ok(Self {
            index,
            tile_colors,
            top_k,
            rng,
        })
    }

    /// Cell indices ordered hardest first by distance to their nearest tile
    pub fn difficulty_order(&self, regions: &[LabColor]) -> Vec<usize> {
        let difficulties: Vec<f64> = self
            .index
            .query_batch(regions, 1)
            .iter()
            .map(|neighbours| neighbours.nearest().map_or(0.0, |(_, distance)| distance))
            .collect();

        let mut order: Vec<usize> = (0..regions.len()).collect();
        order.sort_by(|&a, &b| {
            let da = difficulties.get(a).copied().unwrap_or(0.0);
            let db = difficulties.get(b).copied().unwrap_or(0.0);
            db.total_cmp(&da)
        });
        order
    }

    /// Assign one tile to every cell
    pub fn assign(&mut self, regions: &[LabColor], progress: &mut dyn ProgressSink) -> Assignment {
        let total = regions.len();
        let interval = report_interval(total, PROGRESS_STEPS);
        let order = self.difficulty_order(regions);

        let mut available = AvailableTiles::all(self.index.len());
        let mut tiles = vec![0usize; total];
        let mut duplicates_used = false;
        let mut fallback_scans = 0usize;

        for (count, &region) in order.iter().enumerate() {
            if available.is_empty() {
                duplicates_used = true;
                let remaining = order.get(count..).unwrap_or_default();
                self.assign_nearest(regions, remaining, &mut tiles);
                break;
            }

            let Some(color) = regions.get(region) else {
                continue;
            };

            let candidates: Vec<usize> = self
                .index
                .query(color, self.top_k)
                .indices
                .into_iter()
                .filter(|&tile| available.contains(tile))
                .collect();

            let chosen = if let Some(&tile) = candidates.choose(&mut self.rng) {
                Some(tile)
            } else {
                fallback_scans += 1;
                available.nearest_by_scan(self.tile_colors, color)
            };

            if let Some(tile) = chosen {
                if let Some(slot) = tiles.get_mut(region) {
                    *slot = tile;
                }
                available.remove(tile);
            }

            if (count + 1) % interval == 0 {
                progress.report(ProgressEvent {
                    phase: Phase::Assigning,
                    completed: count + 1,
                    total,
                });
            }
        }

        progress.report(ProgressEvent {
            phase: Phase::Assigning,
            completed: total,
            total,
        });

        debug!("Assignment finished with {fallback_scans} full-scan fallbacks");
        if duplicates_used {
            warn!(
                "Not enough unique photos ({} tiles for {total} cells), some tiles reused for best fit",
                self.index.len()
            );
        }

        Assignment::new(tiles, duplicates_used)
    }

    /// Give each listed cell its globally nearest tile, ignoring prior use
    fn assign_nearest(&self, regions: &[LabColor], cells: &[usize], tiles: &mut [usize]) {
        let colors: Vec<LabColor> = cells
            .iter()
            .filter_map(|&cell| regions.get(cell).copied())
            .collect();
        let nearest = self.index.query_batch(&colors, 1);

        for (&cell, neighbours) in cells.iter().zip(&nearest) {
            if let (Some(slot), Some((tile, _))) = (tiles.get_mut(cell), neighbours.nearest()) {
                *slot = tile;
            }
        }
    }
}
