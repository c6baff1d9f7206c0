//! Generated grid document

use crate::io::error::{AlgorithmError, Result, internal_error};
use crate::spatial::grid::Grid;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fully resolved grid as written to disk
///
/// `tiles` holds one index into `tile_types` per cell, in
/// `z * width * height + y * width + x` order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedOutput {
    /// Extent along x
    pub width: usize,
    /// Extent along y
    pub height: usize,
    /// Extent along z
    pub depth: usize,
    /// Tile type ids in catalog order
    pub tile_types: Vec<String>,
    /// Tile index per cell
    pub tiles: Vec<usize>,
}

impl GeneratedOutput {
    /// Capture a completed grid
    ///
    /// # Errors
    ///
    /// Returns `InternalInvariant` if any cell is unresolved
    pub fn from_grid(grid: &Grid<'_>) -> Result<Self> {
        let tiles = grid.tile_indices().ok_or_else(|| {
            internal_error(
                "output",
                &format!("{} cells are not resolved", grid.unresolved_count()),
            )
        })?;
        let dimensions = grid.dimensions();

        Ok(Self {
            width: dimensions.width,
            height: dimensions.height,
            depth: dimensions.depth,
            tile_types: grid.catalog().ids(),
            tiles,
        })
    }

    /// Tile index at a position
    pub fn tile_at(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        self.tiles
            .get(z * self.width * self.height + y * self.width + x)
            .copied()
    }

    /// Tile id at a position
    pub fn id_at(&self, x: usize, y: usize, z: usize) -> Option<&str> {
        self.tile_at(x, y, z)
            .and_then(|index| self.tile_types.get(index))
            .map(String::as_str)
    }

    /// Render as indented JSON
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write as indented JSON
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing the file fails
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            AlgorithmError::Serialization {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, json).map_err(|source| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "write output",
            source,
        })
    }
}
