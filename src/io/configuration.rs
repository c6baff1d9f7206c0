//! Runtime defaults and the JSON tile configuration format

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::adjacency::Adjacency;
use crate::spatial::tiles::{Catalog, TileType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Selection weight of a tile type that does not declare one
pub const DEFAULT_WEIGHT: u32 = 1;

/// Depth of a request that does not declare one (a single 2D layer)
pub const DEFAULT_DEPTH: usize = 1;

/// Adjacency selector used when a configuration does not name one
pub const DEFAULT_ADJACENCY: &str = "2d";

// Keeps a mistyped dimension from allocating the machine away
/// Maximum number of cells in one generation request
pub const MAX_GRID_CELLS: usize = 16_777_216;

/// Suffix added to the configuration file stem for the default output path
pub const OUTPUT_SUFFIX: &str = "_result";

/// Resolved-cell interval between progress bar redraws
pub const PROGRESS_REFRESH_CELLS: usize = 64;

/// Tile configuration document
///
/// ```json
/// {
///   "adjacency": "2d",
///   "tile_types": [
///     { "id": "land", "weight": 3, "neighbors": [[0, 1], [0, 1], [0, 1], [0, 1]] },
///     { "id": "sea", "neighbors": [[0, 1], [0, 1], [0, 1], [0, 1]] }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Configuration {
    /// Selector of the neighbor topology the rules are written against
    #[serde(default = "default_adjacency")]
    pub adjacency: String,
    /// Tile types in index order
    pub tile_types: Vec<TileType>,
}

impl Configuration {
    /// Parse a configuration from JSON text
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the text is not a valid configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read configuration",
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| AlgorithmError::Serialization {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Topology named by the adjacency selector
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAdjacency` for any selector other than the planar grid
    pub fn adjacency(&self) -> Result<Adjacency> {
        self.adjacency.parse()
    }

    /// Validate the tile table and build a catalog
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedAdjacency` if the selector is unknown, or an error
    /// if the tile table is malformed, see [`Catalog::new`]
    pub fn into_catalog(self) -> Result<Catalog> {
        let adjacency = self.adjacency()?;
        Catalog::new(self.tile_types, adjacency)
    }
}

fn default_adjacency() -> String {
    DEFAULT_ADJACENCY.to_string()
}

/// Default output path for a configuration file
///
/// `rules/coast.json` becomes `rules/coast_result.json`.
pub fn default_output_path(configuration_path: &Path) -> PathBuf {
    let stem = configuration_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{OUTPUT_SUFFIX}.json", stem.to_string_lossy());

    configuration_path.parent().map_or_else(
        || PathBuf::from(&output_name),
        |parent| parent.join(&output_name),
    )
}
