//! Cell geometry of a cropped target image
//!
//! The target is cropped to the largest multiple of the tile size in each dimension,
//! trailing partial rows and columns are discarded, and the remainder is partitioned
//! into square cells addressed in row-major order.

use crate::io::error::{Result, invalid_parameter};

/// Grid of square cells covering the cropped target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Side length of one cell in pixels
    pub tile_size: u32,
    /// Number of cell rows
    pub rows: u32,
    /// Number of cell columns
    pub cols: u32,
}

impl GridGeometry {
    /// Compute the grid covering an image of the given pixel dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero or the image is smaller than one cell
    /// in either dimension
    pub fn for_image(width: u32, height: u32, tile_size: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be positive",
            ));
        }

        let geometry = Self {
            tile_size,
            rows: height / tile_size,
            cols: width / tile_size,
        };

        if geometry.region_count() == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &format!("target image {width}x{height} is smaller than one tile"),
            ));
        }

        Ok(geometry)
    }

    /// Width of the cropped image in pixels
    pub const fn cropped_width(&self) -> u32 {
        self.cols * self.tile_size
    }

    /// Height of the cropped image in pixels
    pub const fn cropped_height(&self) -> u32 {
        self.rows * self.tile_size
    }

    /// Total number of cells
    pub const fn region_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Top-left pixel `(x, y)` of the cell with the given row-major index
    pub const fn region_origin(&self, region: usize) -> (u32, u32) {
        let cols = self.cols as usize;
        let row = (region / cols) as u32;
        let col = (region % cols) as u32;
        (col * self.tile_size, row * self.tile_size)
    }
}
