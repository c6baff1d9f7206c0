//! Neighbor topology between grid cells
//!
//! Each topology maps a position to its in-bounds neighbors and an ordered
//! pair of adjacent positions to a direction index. The direction index selects
//! which per-direction neighbor list of a tile type applies.

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::dimensions::{Dimensions, Position};
use std::fmt;
use std::str::FromStr;

/// Direction index towards `y + 1`
pub const UP: usize = 0;
/// Direction index towards `x + 1`
pub const RIGHT: usize = 1;
/// Direction index towards `y - 1`
pub const DOWN: usize = 2;
/// Direction index towards `x - 1`
pub const LEFT: usize = 3;

/// Available neighbor topologies
///
/// Only the 4-neighbor planar grid exists today. Neighbors never wrap around
/// the grid edges and never cross layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    /// Up, right, down and left neighbors within one layer
    Grid2d,
}

impl Adjacency {
    /// Number of direction indices the topology defines
    pub const fn direction_count(self) -> usize {
        match self {
            Self::Grid2d => 4,
        }
    }

    /// Direction index pointing the opposite way
    pub const fn opposite(self, direction: usize) -> usize {
        match self {
            Self::Grid2d => (direction + 2) % 4,
        }
    }

    /// In-bounds neighbors of a position
    ///
    /// Order is left, right, down, up. Propagation visits neighbors in this
    /// order, so changing it changes generated output for a given seed.
    pub fn neighbors(self, position: Position, dimensions: Dimensions) -> Vec<Position> {
        match self {
            Self::Grid2d => {
                let Position { x, y, z } = position;
                let mut neighbors = Vec::with_capacity(4);
                if x > 0 {
                    neighbors.push(Position::new(x - 1, y, z));
                }
                if x + 1 < dimensions.width {
                    neighbors.push(Position::new(x + 1, y, z));
                }
                if y > 0 {
                    neighbors.push(Position::new(x, y - 1, z));
                }
                if y + 1 < dimensions.height {
                    neighbors.push(Position::new(x, y + 1, z));
                }
                neighbors
            }
        }
    }

    /// Direction index from `from` towards `to`
    ///
    /// # Errors
    ///
    /// Returns `InvalidAdjacency` if the positions are not neighbors under
    /// this topology.
    pub const fn direction_index(self, from: Position, to: Position) -> Result<usize> {
        match self {
            Self::Grid2d => {
                if from.z != to.z {
                    return Err(AlgorithmError::InvalidAdjacency { from, to });
                }
                if from.x == to.x && from.y.abs_diff(to.y) == 1 {
                    return Ok(if from.y < to.y { UP } else { DOWN });
                }
                if from.y == to.y && from.x.abs_diff(to.x) == 1 {
                    return Ok(if from.x < to.x { RIGHT } else { LEFT });
                }
                Err(AlgorithmError::InvalidAdjacency { from, to })
            }
        }
    }

    /// Selector name used in configuration files
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grid2d => "2d",
        }
    }
}

impl FromStr for Adjacency {
    type Err = AlgorithmError;

    fn from_str(selector: &str) -> Result<Self> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "2d" | "adjacency_2d" | "grid2d" => Ok(Self::Grid2d),
            _ => Err(AlgorithmError::UnsupportedAdjacency {
                selector: selector.to_string(),
            }),
        }
    }
}

impl fmt::Display for Adjacency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
