//! Target loading, mosaic composition and output writing

use crate::algorithm::assignment::Assignment;
use crate::io::configuration::PARTIAL_OUTPUT_SUFFIX;
use crate::io::error::{MosaicError, Result};
use crate::spatial::grid::GridGeometry;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, ImageResult, RgbImage, imageops};
use std::path::{Path, PathBuf};

/// Decode an image file, detecting the format from its content
///
/// The extension is only consulted when the content matches no known format, so a
/// PNG saved under a `.jpg` name still decodes.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn decode_image(path: &Path) -> ImageResult<DynamicImage> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

/// Decode the target image as 8-bit RGB
///
/// # Errors
///
/// Returns an error if the file is missing or is not a decodable image
pub fn load_target(path: &Path) -> Result<RgbImage> {
    decode_image(path)
        .map(|decoded| decoded.to_rgb8())
        .map_err(|e| MosaicError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Stitch assigned tiles into one image covering the cropped target
///
/// Tiles are placed by cell in row-major order, in their original RGB values.
///
/// # Errors
///
/// Returns an error if:
/// - The assignment does not cover exactly the grid's cells
/// - An assigned tile index is outside `tiles`
/// - A tile is not `tile_size` pixels square
pub fn compose_mosaic(
    assignment: &Assignment,
    tiles: &[RgbImage],
    geometry: &GridGeometry,
) -> Result<RgbImage> {
    if assignment.len() != geometry.region_count() {
        return Err(MosaicError::InvalidParameter {
            parameter: "assignment",
            value: assignment.len().to_string(),
            reason: format!("expected {} cells", geometry.region_count()),
        });
    }

    let mut mosaic = RgbImage::new(geometry.cropped_width(), geometry.cropped_height());

    for (region, &tile_index) in assignment.tiles().iter().enumerate() {
        let tile = tiles.get(tile_index).ok_or(MosaicError::InvalidTileIndex {
            index: tile_index,
            max_tiles: tiles.len(),
        })?;

        if tile.dimensions() != (geometry.tile_size, geometry.tile_size) {
            return Err(MosaicError::InvalidParameter {
                parameter: "tiles",
                value: format!("{}x{}", tile.width(), tile.height()),
                reason: format!(
                    "tile {tile_index} must be {0}x{0} pixels",
                    geometry.tile_size
                ),
            });
        }

        let (x, y) = geometry.region_origin(region);
        imageops::replace(&mut mosaic, tile, i64::from(x), i64::from(y));
    }

    Ok(mosaic)
}

/// Write the mosaic to `output_path`, replacing any existing file
///
/// Parent directories are created as needed. The image is encoded to a sibling
/// temporary file first and renamed into place, so the destination never holds a
/// partially written mosaic. The format follows the path's extension.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the extension names no
/// supported format, or encoding or renaming fails
pub fn write_mosaic(mosaic: &RgbImage, output_path: &Path) -> Result<()> {
    let write_error = |source: ImageError| MosaicError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    let format = ImageFormat::from_path(output_path).map_err(write_error)?;

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| write_error(ImageError::IoError(e)))?;
    }

    let partial = partial_path(output_path);
    let written = mosaic
        .save_with_format(&partial, format)
        .and_then(|()| std::fs::rename(&partial, output_path).map_err(ImageError::IoError));

    if let Err(e) = written {
        // Best effort; the original error is what matters
        let _ = std::fs::remove_file(&partial);
        return Err(write_error(e));
    }

    Ok(())
}

/// Temporary sibling path used while writing `output_path`
pub fn partial_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(PARTIAL_OUTPUT_SUFFIX);
    output_path.with_file_name(name)
}
