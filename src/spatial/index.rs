//! Exact k-nearest lookup over tile colors
//!
//! Built once from the full tile set and read-only afterwards. Tiles that have
//! already been used are filtered by the caller, never removed from the tree.

use crate::math::color::LabColor;
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use rayon::prelude::*;
use std::num::NonZeroUsize;

/// Nearest tiles to a query color, ordered nearest-first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neighbours {
    /// Tile indices, nearest first
    pub indices: Vec<usize>,
    /// Euclidean distances parallel to `indices`
    pub distances: Vec<f64>,
}

impl Neighbours {
    /// Nearest tile and its distance
    pub fn nearest(&self) -> Option<(usize, f64)> {
        self.indices
            .first()
            .copied()
            .zip(self.distances.first().copied())
    }

    /// Number of neighbours returned
    pub const fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no neighbours were returned
    pub const fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// K-d tree over tile colors in LAB space
pub struct ColorIndex {
    tree: ImmutableKdTree<f64, 3>,
    len: usize,
}

impl ColorIndex {
    /// Build the index from tile colors; tile `i` is stored under index `i`
    ///
    /// `colors` is expected to be non-empty; [`crate::analysis::digest::TileSet`] guarantees it.
    pub fn new(colors: &[LabColor]) -> Self {
        Self {
            tree: ImmutableKdTree::new_from_slice(colors),
            len: colors.len(),
        }
    }

    /// Number of indexed tiles
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Up to `k` tiles nearest to `point`
    ///
    /// A `k` beyond the tile count returns every tile.
    pub fn query(&self, point: &LabColor, k: usize) -> Neighbours {
        let Some(k) = NonZeroUsize::new(k.min(self.len)) else {
            return Neighbours::default();
        };

        let mut found = self.tree.nearest_n::<SquaredEuclidean>(point, k);
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let (indices, distances) = found
            .into_iter()
            .map(|neighbour| (neighbour.item as usize, neighbour.distance.sqrt()))
            .unzip();

        Neighbours { indices, distances }
    }

    /// Run [`Self::query`] for every point, results parallel to `points`
    pub fn query_batch(&self, points: &[LabColor], k: usize) -> Vec<Neighbours> {
        points
            .par_iter()
            .map(|point| self.query(point, k))
            .collect()
    }
}
