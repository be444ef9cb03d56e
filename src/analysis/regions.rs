//! Color reduction of the target image into per-cell LAB averages

use crate::io::error::{Result, computation_error};
use crate::math::color::{LabColor, srgb_to_lab};
use crate::spatial::grid::GridGeometry;
use image::RgbImage;
use ndarray::{Array3, Axis};
use rayon::prelude::*;

/// Average LAB color of every grid cell of a target image
#[derive(Debug, Clone, PartialEq)]
pub struct RegionColors {
    geometry: GridGeometry,
    colors: Vec<LabColor>,
}

impl RegionColors {
    /// Reduce an image to one mean LAB color per `tile_size` square cell
    ///
    /// The image is cropped to the largest multiple of `tile_size` in each dimension
    /// before averaging. Output is deterministic for a given image and tile size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero or the image is smaller than one cell
    pub fn from_image(image: &RgbImage, tile_size: u32) -> Result<Self> {
        let geometry = GridGeometry::for_image(image.width(), image.height(), tile_size)?;
        let lab = lab_plane(image, &geometry)?;

        let side = tile_size as usize;
        let count = (side * side) as f64;
        let blocks: Vec<_> = lab.exact_chunks((side, side, 3)).into_iter().collect();
        let colors: Vec<LabColor> = blocks
            .par_iter()
            .map(|block| {
                let totals = block.sum_axis(Axis(0)).sum_axis(Axis(0));
                let mut mean = [0.0; 3];
                for (channel, total) in mean.iter_mut().zip(&totals) {
                    *channel = total / count;
                }
                mean
            })
            .collect();

        Ok(Self { geometry, colors })
    }

    /// Grid the colors were computed over
    pub const fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Cell colors in row-major order
    pub fn colors(&self) -> &[LabColor] {
        &self.colors
    }

    /// Number of cells
    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether there are no cells
    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Convert the cropped part of the image to a `(height, width, 3)` LAB array
fn lab_plane(image: &RgbImage, geometry: &GridGeometry) -> Result<Array3<f64>> {
    let width = geometry.cropped_width();
    let height = geometry.cropped_height();

    let values: Vec<f64> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| (0..width).flat_map(move |x| srgb_to_lab(*image.get_pixel(x, y))))
        .collect();

    Array3::from_shape_vec((height as usize, width as usize, 3), values)
        .map_err(|e| computation_error("lab conversion", &e))
}
