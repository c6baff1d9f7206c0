//! Solver grid state
//!
//! Every cell either holds one resolved tile type or a set of tile types that
//! are still legal. Cells whose set was narrowed below the full catalog but
//! which are not resolved yet are tracked in an [`EntropyIndex`] so the most
//! constrained cell is always at hand.

use ndarray::Array3;

use crate::algorithm::bitset::PossibilitySet;
use crate::algorithm::entropy::EntropyIndex;
use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::MAX_GRID_CELLS;
use crate::io::error::{AlgorithmError, Result, internal_error, invalid_parameter};
use crate::spatial::dimensions::{Dimensions, Position};
use crate::spatial::tiles::Catalog;

/// Flat index of a cell, `z * width * height + y * width + x`
pub type CellId = usize;

/// One grid position and what may still occupy it
#[derive(Clone, Debug)]
pub struct Cell {
    position: Position,
    resolved: Option<usize>,
    possible: PossibilitySet,
}

impl Cell {
    /// Position of the cell
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Resolved tile type, if collapsed
    pub const fn resolved(&self) -> Option<usize> {
        self.resolved
    }

    /// Tile types still legal (empty once resolved)
    pub const fn possible(&self) -> &PossibilitySet {
        &self.possible
    }

    /// Holds a tile type and nothing else remains possible
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some() && self.possible.is_empty()
    }

    /// Holds no tile type and nothing remains possible
    pub fn is_contradicted(&self) -> bool {
        self.resolved.is_none() && self.possible.is_empty()
    }

    /// Number of tile types this cell may still hold (1 once resolved)
    pub fn cardinality(&self) -> usize {
        if self.resolved.is_some() {
            1
        } else {
            self.possible.count()
        }
    }

    /// Tile types to consider when constraining neighbors
    fn candidates(&self) -> impl Iterator<Item = usize> + '_ {
        self.resolved.into_iter().chain(self.possible.iter())
    }
}

/// Mutable solver state for one generation request
#[derive(Clone, Debug)]
pub struct Grid<'c> {
    catalog: &'c Catalog,
    dimensions: Dimensions,
    /// Cells shaped `(depth, height, width)`, so logical order is flat order
    cells: Array3<Cell>,
    narrowed: EntropyIndex,
    unresolved: usize,
    contradiction: Option<CellId>,
}

impl<'c> Grid<'c> {
    /// Create a grid where every cell may hold every tile type
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a dimension is zero or the grid exceeds
    /// `MAX_GRID_CELLS`.
    pub fn new(catalog: &'c Catalog, dimensions: Dimensions) -> Result<Self> {
        Self::with_initial_tiles(catalog, dimensions, |_| None)
    }

    /// Create a grid with per-position overrides of the initially legal tile types
    ///
    /// `initial` returns `None` to allow the whole catalog. A position with
    /// exactly one legal type starts resolved, one with none starts contradicted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for unusable dimensions and
    /// `InvalidTileIndex` if an override names a tile outside the catalog.
    pub fn with_initial_tiles<F>(
        catalog: &'c Catalog,
        dimensions: Dimensions,
        mut initial: F,
    ) -> Result<Self>
    where
        F: FnMut(Position) -> Option<Vec<usize>>,
    {
        if dimensions.is_empty() {
            return Err(invalid_parameter(
                "dimensions",
                &dimensions,
                &"width, height and depth must be at least 1",
            ));
        }
        let cell_count = dimensions
            .cell_count()
            .filter(|&count| count <= MAX_GRID_CELLS)
            .ok_or_else(|| {
                invalid_parameter(
                    "dimensions",
                    &dimensions,
                    &format!("grid may hold at most {MAX_GRID_CELLS} cells"),
                )
            })?;

        let tile_count = catalog.len();
        let mut cells = Vec::with_capacity(cell_count);
        let mut narrowed = EntropyIndex::new(cell_count);
        let mut unresolved = 0;
        let mut contradiction = None;

        for z in 0..dimensions.depth {
            for y in 0..dimensions.height {
                for x in 0..dimensions.width {
                    let position = Position::new(x, y, z);
                    let id = cells.len();
                    let possible = match initial(position) {
                        Some(indices) => {
                            if let Some(&index) = indices.iter().find(|&&i| i >= tile_count) {
                                return Err(AlgorithmError::InvalidTileIndex {
                                    index,
                                    max_tiles: tile_count,
                                });
                            }
                            PossibilitySet::from_indices(tile_count, &indices)
                        }
                        None => PossibilitySet::full(tile_count),
                    };

                    let cell = match possible.count() {
                        0 => {
                            unresolved += 1;
                            contradiction.get_or_insert(id);
                            Cell {
                                position,
                                resolved: None,
                                possible,
                            }
                        }
                        1 => Cell {
                            position,
                            resolved: possible.iter().next(),
                            possible: PossibilitySet::empty(tile_count),
                        },
                        count => {
                            unresolved += 1;
                            if count < tile_count {
                                narrowed.upsert(id, count);
                            }
                            Cell {
                                position,
                                resolved: None,
                                possible,
                            }
                        }
                    };
                    cells.push(cell);
                }
            }
        }

        let cells = Array3::from_shape_vec(
            (dimensions.depth, dimensions.height, dimensions.width),
            cells,
        )
        .map_err(|e| internal_error("grid construction", &e))?;

        Ok(Self {
            catalog,
            dimensions,
            cells,
            narrowed,
            unresolved,
            contradiction,
        })
    }

    /// Catalog the grid draws tile types from
    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Grid extents
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cells in flat index order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Cell by flat index
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        let position = self.dimensions.position(id)?;
        self.cells.get([position.z, position.y, position.x])
    }

    /// Cell by position
    pub fn cell_at(&self, position: Position) -> Option<&Cell> {
        self.cells.get([position.z, position.y, position.x])
    }

    /// Flat index of a position
    pub const fn id_of(&self, position: Position) -> Option<CellId> {
        self.dimensions.index(position)
    }

    /// Number of cells not yet resolved, contradicted cells included
    pub const fn unresolved_count(&self) -> usize {
        self.unresolved
    }

    /// Number of cells in the narrowed index
    pub const fn narrowed_count(&self) -> usize {
        self.narrowed.len()
    }

    /// First cell that was left without any legal tile type
    pub const fn contradiction(&self) -> Option<CellId> {
        self.contradiction
    }

    /// True iff every cell is resolved
    pub const fn is_complete(&self) -> bool {
        self.unresolved == 0
    }

    /// Next cell to collapse
    ///
    /// The narrowed cell with the smallest possibility set when any exists,
    /// otherwise a uniformly random unresolved cell that still has possibilities.
    ///
    /// # Errors
    ///
    /// Returns `InternalInvariant` if the index disagrees with the stored
    /// possibility sets or if no candidate cell is left.
    pub fn most_constrained_cell(&mut self, selector: &mut RandomSelector) -> Result<CellId> {
        if let Some((id, cardinality)) = self.narrowed.peek_min() {
            let stored = self.cell(id).map(|cell| cell.possible.count());
            if stored != Some(cardinality) {
                return Err(internal_error(
                    "most_constrained_cell",
                    &format!("cell {id} indexed at {cardinality}, holds {stored:?}"),
                ));
            }
            return Ok(id);
        }

        let open: Vec<CellId> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(id, cell)| {
                cell.resolved.is_none() && !cell.possible.is_empty() && !self.narrowed.contains(*id)
            })
            .map(|(id, _)| id)
            .collect();

        selector
            .pick_index(open.len())
            .and_then(|pick| open.get(pick).copied())
            .ok_or_else(|| internal_error("most_constrained_cell", &"no unresolved cell left"))
    }

    /// Flat indices of all in-bounds neighbors
    pub fn neighbors(&self, id: CellId) -> Vec<CellId> {
        let Some(position) = self.dimensions.position(id) else {
            return Vec::new();
        };
        self.catalog
            .adjacency()
            .neighbors(position, self.dimensions)
            .into_iter()
            .filter_map(|neighbor| self.dimensions.index(neighbor))
            .collect()
    }

    /// Neighbors that are not resolved
    pub fn undecided_neighbors(&self, id: CellId) -> Vec<CellId> {
        self.neighbors(id)
            .into_iter()
            .filter(|&neighbor| self.cell(neighbor).is_some_and(|cell| !cell.is_resolved()))
            .collect()
    }

    /// Tile types any candidate of `cell` allows at `neighbor`
    ///
    /// # Errors
    ///
    /// Returns `InvalidAdjacency` if the two cells are not neighbors and
    /// `InternalInvariant` if either id is outside the grid.
    pub fn legal_neighbor_tile_types(
        &self,
        cell: CellId,
        neighbor: CellId,
    ) -> Result<PossibilitySet> {
        let source = self.require(cell, "legal_neighbor_tile_types")?;
        let target = self.require(neighbor, "legal_neighbor_tile_types")?;
        let direction = self
            .catalog
            .adjacency()
            .direction_index(source.position, target.position)?;

        let mut legal = PossibilitySet::empty(self.catalog.len());
        for tile in source.candidates() {
            if let Some(allowed) = self.catalog.legal_neighbors(tile, direction) {
                legal.union_with(allowed);
            }
        }
        Ok(legal)
    }

    /// Commit a cell to one tile type
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` for a tile outside the catalog and
    /// `InternalInvariant` if the cell is already resolved or does not allow
    /// the tile.
    pub fn collapse(&mut self, id: CellId, tile: usize) -> Result<()> {
        if tile >= self.catalog.len() {
            return Err(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: self.catalog.len(),
            });
        }
        let position = self
            .dimensions
            .position(id)
            .ok_or_else(|| internal_error("collapse", &format!("cell {id} is outside the grid")))?;
        let cell = self
            .cells
            .get_mut([position.z, position.y, position.x])
            .ok_or_else(|| internal_error("collapse", &format!("cell {id} is missing")))?;

        if cell.resolved.is_some() {
            return Err(internal_error(
                "collapse",
                &format!("cell {position} is already resolved"),
            ));
        }
        if !cell.possible.contains(tile) {
            return Err(internal_error(
                "collapse",
                &format!("tile {tile} is not possible at {position}"),
            ));
        }

        cell.resolved = Some(tile);
        cell.possible.clear();
        self.narrowed.remove(id);
        self.unresolved -= 1;
        Ok(())
    }

    /// Replace a cell's possibility set with a subset of it
    ///
    /// An empty set records a contradiction at the cell and takes it out of
    /// the narrowed index.
    ///
    /// # Errors
    ///
    /// Returns `InternalInvariant` if the cell is resolved or if the new set
    /// would reintroduce a tile type that was already ruled out.
    pub fn narrow(&mut self, id: CellId, possible: PossibilitySet) -> Result<()> {
        let position = self
            .dimensions
            .position(id)
            .ok_or_else(|| internal_error("narrow", &format!("cell {id} is outside the grid")))?;
        let cell = self
            .cells
            .get_mut([position.z, position.y, position.x])
            .ok_or_else(|| internal_error("narrow", &format!("cell {id} is missing")))?;

        if cell.resolved.is_some() {
            return Err(internal_error(
                "narrow",
                &format!("cell {position} is already resolved"),
            ));
        }
        if possible.capacity() != cell.possible.capacity() || !possible.is_subset(&cell.possible) {
            return Err(internal_error(
                "narrow",
                &format!("{possible} would widen {} at {position}", cell.possible),
            ));
        }

        let cardinality = possible.count();
        cell.possible = possible;
        if cardinality == 0 {
            self.narrowed.remove(id);
            self.contradiction.get_or_insert(id);
        } else {
            self.narrowed.upsert(id, cardinality);
        }
        Ok(())
    }

    /// Resolved tile index of every cell in flat order, `None` if incomplete
    pub fn tile_indices(&self) -> Option<Vec<usize>> {
        self.cells
            .iter()
            .map(|cell| cell.is_resolved().then_some(cell.resolved).flatten())
            .collect()
    }

    fn require(&self, id: CellId, operation: &'static str) -> Result<&Cell> {
        self.cell(id)
            .ok_or_else(|| internal_error(operation, &format!("cell {id} is outside the grid")))
    }
}
