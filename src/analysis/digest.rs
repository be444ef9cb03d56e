//! Candidate photo discovery and tile digests
//!
//! Every accepted photo is resized (not cropped) to a `tile_size` square. The resized
//! RGB image is kept for composition and its mean LAB color is kept for matching.

use crate::io::configuration::{PROGRESS_STEPS, SUPPORTED_EXTENSIONS};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::decode_image;
use crate::io::progress::{Phase, ProgressEvent, ProgressSink, report_interval};
use crate::math::color::{self, LabColor};
use image::RgbImage;
use image::imageops::{self, FilterType};
use log::{debug, info};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Decoded candidate photos with their representative colors
#[derive(Debug, Clone)]
pub struct TileSet {
    images: Vec<RgbImage>,
    colors: Vec<LabColor>,
    skipped: usize,
}

impl TileSet {
    /// Load every supported photo in `directory` (non-recursive) as a tile
    ///
    /// Files that fail to decode are skipped and counted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tile_size` is zero
    /// - The directory cannot be read
    /// - No file in the directory decodes successfully
    pub fn from_directory(
        directory: &Path,
        tile_size: u32,
        progress: &mut dyn ProgressSink,
    ) -> Result<Self> {
        let files = discover_candidates(directory)?;
        info!(
            "Found {} candidate photos in {}",
            files.len(),
            directory.display()
        );
        Self::from_files(directory, &files, tile_size, progress)
    }

    /// Load tiles from an explicit list of files
    ///
    /// `directory` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero or none of the files decode
    pub fn from_files(
        directory: &Path,
        files: &[PathBuf],
        tile_size: u32,
        progress: &mut dyn ProgressSink,
    ) -> Result<Self> {
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be positive",
            ));
        }

        let total = files.len();
        let chunk_size = decode_chunk_size(total);
        let mut tile_set = Self {
            images: Vec::with_capacity(total),
            colors: Vec::with_capacity(total),
            skipped: 0,
        };

        let mut completed = 0;
        for chunk in files.chunks(chunk_size) {
            let digests: Vec<Option<(RgbImage, LabColor)>> = chunk
                .par_iter()
                .map(|path| digest_file(path, tile_size))
                .collect();

            for digest in digests {
                if let Some((image, color)) = digest {
                    tile_set.images.push(image);
                    tile_set.colors.push(color);
                } else {
                    tile_set.skipped += 1;
                }
            }

            completed += chunk.len();
            progress.report(ProgressEvent {
                phase: Phase::LoadingTiles,
                completed,
                total,
            });
        }

        if tile_set.images.is_empty() {
            return Err(MosaicError::NoCandidates {
                directory: directory.to_path_buf(),
                skipped: tile_set.skipped,
            });
        }

        info!(
            "Loaded {} tiles ({} skipped)",
            tile_set.images.len(),
            tile_set.skipped
        );
        Ok(tile_set)
    }

    /// Resized tile images, parallel to [`Self::colors`]
    pub fn images(&self) -> &[RgbImage] {
        &self.images
    }

    /// Mean LAB color of each tile
    pub fn colors(&self) -> &[LabColor] {
        &self.colors
    }

    /// Number of candidate files that failed to decode
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the set holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Whether the path has one of the supported photo extensions, ignoring case
pub fn is_supported_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// List supported photo files directly inside `directory`, sorted by path
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read
pub fn discover_candidates(directory: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source: std::io::Error| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_supported_photo(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Resize an image to a `tile_size` square and compute its mean LAB color
pub fn digest_image(image: &RgbImage, tile_size: u32) -> (RgbImage, LabColor) {
    let tile = imageops::resize(image, tile_size, tile_size, FilterType::Triangle);
    let colors = tile.pixels().map(|pixel| color::srgb_to_lab(*pixel));
    let mean = color::mean(colors).unwrap_or_default();
    (tile, mean)
}

/// Number of files decoded in parallel between two progress reports
///
/// At least one file per worker thread, so small candidate sets still decode in parallel.
pub fn decode_chunk_size(total: usize) -> usize {
    report_interval(total, PROGRESS_STEPS).max(rayon::current_num_threads())
}

fn digest_file(path: &Path, tile_size: u32) -> Option<(RgbImage, LabColor)> {
    match decode_image(path) {
        Ok(decoded) => Some(digest_image(&decoded.to_rgb8(), tile_size)),
        Err(e) => {
            debug!("Skipping {}: {e}", path.display());
            None
        }
    }
}
