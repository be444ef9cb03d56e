use crate::math::color::{LabColor, squared_distance};
use bitvec::prelude::*;
use std::fmt;

/// Set of tile indices not yet assigned to any cell
///
/// Uses 0-based tile indices. Membership and removal are O(1); the set is local
/// to one assignment run and discarded afterwards.
#[derive(Clone, Debug)]
pub struct AvailableTiles {
    bits: BitVec,
    remaining: usize,
}

impl AvailableTiles {
    /// Create a set containing every tile in `0..tile_count`
    pub fn all(tile_count: usize) -> Self {
        Self {
            bits: bitvec![1; tile_count],
            remaining: tile_count,
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Remove a tile, returning whether it was present
    pub fn remove(&mut self, tile: usize) -> bool {
        let was_present = self.contains(tile);
        if was_present {
            self.bits.set(tile, false);
            self.remaining -= 1;
        }
        was_present
    }

    /// Number of tiles still available
    pub const fn len(&self) -> usize {
        self.remaining
    }

    /// Whether every tile has been used
    pub const fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Available tile indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Closest available tile to `target` by direct scan over every available tile
    ///
    /// `colors` is indexed by tile. Returns `None` when the set is empty.
    pub fn nearest_by_scan(&self, colors: &[LabColor], target: &LabColor) -> Option<usize> {
        self.iter()
            .filter_map(|tile| {
                colors
                    .get(tile)
                    .map(|color| (tile, squared_distance(color, target)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(tile, _)| tile)
    }
}

impl fmt::Display for AvailableTiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AvailableTiles({}/{})", self.remaining, self.bits.len())
    }
}
