//! Prefill documents that restrict the initially legal tile types per position

use crate::io::error::{AlgorithmError, Result, invalid_configuration};
use crate::spatial::dimensions::{Dimensions, Position};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::Catalog;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct PrefillDocument {
    cells: Vec<PrefillEntry>,
}

#[derive(Debug, Deserialize)]
struct PrefillEntry {
    x: usize,
    y: usize,
    #[serde(default)]
    z: usize,
    tiles: Vec<String>,
}

/// Per-position overrides of the tile types a cell may start with
///
/// ```json
/// { "cells": [ { "x": 0, "y": 0, "tiles": ["sea"] },
///              { "x": 4, "y": 2, "z": 0, "tiles": ["land", "sand"] } ] }
/// ```
///
/// A single id pins the cell, several ids narrow it, and positions not
/// listed allow the whole catalog.
#[derive(Clone, Debug, Default)]
pub struct PrefillData {
    constraints: HashMap<Position, Vec<usize>>,
}

impl PrefillData {
    /// Parse a prefill document against a catalog and grid size
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is not a valid prefill document
    /// - A tile id is not in the catalog
    /// - A position lies outside `dimensions` or is listed twice
    pub fn from_json_str(json: &str, catalog: &Catalog, dimensions: Dimensions) -> Result<Self> {
        let document: PrefillDocument = serde_json::from_str(json)?;
        Self::from_document(document, catalog, dimensions)
    }

    /// Read a prefill file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation, see
    /// [`PrefillData::from_json_str`]
    pub fn from_path(path: &Path, catalog: &Catalog, dimensions: Dimensions) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read prefill",
            source,
        })?;
        let document: PrefillDocument =
            serde_json::from_str(&text).map_err(|source| AlgorithmError::Serialization {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_document(document, catalog, dimensions)
    }

    fn from_document(
        document: PrefillDocument,
        catalog: &Catalog,
        dimensions: Dimensions,
    ) -> Result<Self> {
        let mut constraints = HashMap::with_capacity(document.cells.len());

        for entry in document.cells {
            let position = Position::new(entry.x, entry.y, entry.z);
            if !dimensions.contains(position) {
                return Err(invalid_configuration(&format!(
                    "prefill position {position} is outside the {dimensions} grid"
                )));
            }

            let mut tiles = Vec::with_capacity(entry.tiles.len());
            for id in &entry.tiles {
                let index = catalog.index_of(id).ok_or_else(|| {
                    invalid_configuration(&format!(
                        "prefill at {position} names unknown tile '{id}'"
                    ))
                })?;
                tiles.push(index);
            }

            if constraints.insert(position, tiles).is_some() {
                return Err(invalid_configuration(&format!(
                    "prefill lists position {position} more than once"
                )));
            }
        }

        Ok(Self { constraints })
    }

    /// Tile types a position may start with, `None` for unconstrained
    pub fn initial_tiles(&self, position: Position) -> Option<Vec<usize>> {
        self.constraints.get(&position).cloned()
    }

    /// Number of constrained positions
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether no position is constrained
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Build a grid with these overrides applied
    ///
    /// # Errors
    ///
    /// See [`Grid::with_initial_tiles`]
    pub fn build_grid<'c>(&self, catalog: &'c Catalog, dimensions: Dimensions) -> Result<Grid<'c>> {
        Grid::with_initial_tiles(catalog, dimensions, |position| self.initial_tiles(position))
    }
}
