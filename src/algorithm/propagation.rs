use crate::{
    io::error::{AlgorithmError, Result},
    spatial::dimensions::Position,
    spatial::grid::{CellId, Grid},
};
use bitvec::prelude::*;
use std::collections::VecDeque;

/// Cell that ran out of legal tile types and the neighbor responsible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction {
    /// Flat index of the contradicted cell
    pub cell: CellId,
    /// Position of the contradicted cell
    pub position: Position,
    /// Neighbor whose constraint emptied the cell, `None` if it started empty
    pub neighbor: Option<Position>,
}

impl Contradiction {
    /// Convert into the caller-facing error for a given solver iteration
    pub const fn into_error(self, iteration: usize) -> AlgorithmError {
        AlgorithmError::Contradiction {
            position: self.position,
            neighbor: self.neighbor,
            iteration,
        }
    }
}

/// Result of draining the propagation queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// Queue drained without emptying any cell
    Settled(PropagationStats),
    /// A cell was left without legal tile types
    Contradicted(Contradiction),
}

/// Work done by one propagation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Cells taken off the queue
    pub visited: usize,
    /// Possibility sets that shrank
    pub narrowed: usize,
}

/// FIFO of cells whose constraints must be pushed to their neighbors
///
/// A cell already waiting in the queue is not queued twice; it will read its
/// latest possibility set when it is processed.
#[derive(Clone, Debug, Default)]
pub struct PropagationQueue {
    queue: VecDeque<CellId>,
    pending: BitVec,
}

impl PropagationQueue {
    /// Create an empty queue for a grid with `cell_count` cells
    pub fn new(cell_count: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            pending: bitvec![0; cell_count],
        }
    }

    /// Queue a cell, returning false if it was already waiting
    pub fn push(&mut self, cell: CellId) -> bool {
        if self.pending.get(cell).as_deref() != Some(&false) {
            return false;
        }
        self.pending.set(cell, true);
        self.queue.push_back(cell);
        true
    }

    /// Take the oldest waiting cell
    pub fn pop(&mut self) -> Option<CellId> {
        let cell = self.queue.pop_front()?;
        if cell < self.pending.len() {
            self.pending.set(cell, false);
        }
        Some(cell)
    }

    /// Number of waiting cells
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no cell is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Breadth-first constraint propagation from `origins`
///
/// Each undecided neighbor of a processed cell is narrowed to the intersection
/// of its current possibilities with what the processed cell allows, and
/// queued if it shrank. A neighbor found already empty is recorded and skipped;
/// a neighbor emptied here stops propagation at once.
///
/// # Errors
///
/// Returns an error only when the grid reports an internal invariant violation
/// or an adjacency query fails.
pub fn propagate(grid: &mut Grid<'_>, origins: &[CellId]) -> Result<PropagationOutcome> {
    let mut queue = PropagationQueue::new(grid.cell_count());
    for &origin in origins {
        queue.push(origin);
    }

    let mut stats = PropagationStats::default();
    let mut recorded: Option<Contradiction> = None;

    while let Some(current) = queue.pop() {
        stats.visited += 1;

        for neighbor in grid.undecided_neighbors(current) {
            let Some(cell) = grid.cell(neighbor) else {
                continue;
            };

            if cell.possible().is_empty() {
                if recorded.is_none() {
                    recorded = Some(contradiction_between(grid, neighbor, Some(current)));
                }
                continue;
            }

            let valid = grid.legal_neighbor_tile_types(current, neighbor)?;
            let remaining = cell.possible().intersection(&valid);
            if remaining.count() == cell.possible().count() {
                continue;
            }

            let emptied = remaining.is_empty();
            grid.narrow(neighbor, remaining)?;
            stats.narrowed += 1;

            if emptied {
                let contradiction = contradiction_between(grid, neighbor, Some(current));
                log::debug!(
                    "Propagation emptied {} from {:?} after narrowing {} cells",
                    contradiction.position,
                    contradiction.neighbor,
                    stats.narrowed
                );
                return Ok(PropagationOutcome::Contradicted(contradiction));
            }
            queue.push(neighbor);
        }
    }

    Ok(recorded.map_or(
        PropagationOutcome::Settled(stats),
        PropagationOutcome::Contradicted,
    ))
}

/// Detect contradictions a grid already holds before any collapse
///
/// Reports a cell that starts with no legal tile type, then any pair of
/// adjacent pre-resolved cells whose tile types reject each other.
///
/// # Errors
///
/// Returns an error if an adjacency query between neighbors fails.
pub fn check_initial_consistency(grid: &Grid<'_>) -> Result<Option<Contradiction>> {
    if let Some(cell) = grid.contradiction() {
        return Ok(Some(contradiction_between(grid, cell, None)));
    }

    let catalog = grid.catalog();
    let adjacency = catalog.adjacency();

    for (id, cell) in grid.cells().enumerate() {
        let Some(tile) = cell.resolved() else {
            continue;
        };
        for neighbor in grid.neighbors(id) {
            let Some(other) = grid.cell(neighbor) else {
                continue;
            };
            let Some(other_tile) = other.resolved() else {
                continue;
            };
            let direction = adjacency.direction_index(cell.position(), other.position())?;
            if !catalog.allows(tile, direction, other_tile) {
                return Ok(Some(contradiction_between(grid, neighbor, Some(id))));
            }
        }
    }

    Ok(None)
}

/// Cells that constrain their neighbors before the first collapse
///
/// Resolved cells and cells already narrowed below the full catalog, in flat
/// index order.
pub fn constrained_cells(grid: &Grid<'_>) -> Vec<CellId> {
    let tile_count = grid.catalog().len();
    grid.cells()
        .enumerate()
        .filter(|(_, cell)| cell.resolved().is_some() || cell.possible().count() < tile_count)
        .map(|(id, _)| id)
        .collect()
}

fn contradiction_between(grid: &Grid<'_>, cell: CellId, neighbor: Option<CellId>) -> Contradiction {
    let position_of = |id: CellId| grid.cell(id).map(crate::spatial::grid::Cell::position);
    Contradiction {
        cell,
        position: position_of(cell).unwrap_or_default(),
        neighbor: neighbor.and_then(position_of),
    }
}
