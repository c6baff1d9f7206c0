//! Grid extents and cell positions
//!
//! Cells are addressed either by a [`Position`] or by their flat index
//! `z * width * height + y * width + x`, which is also the order of the
//! generated output.

use std::fmt;

/// Coordinates of a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
    /// Layer (0 for 2D grids)
    pub z: usize,
}

impl Position {
    /// Create a position on an arbitrary layer
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Create a position on the first layer
    pub const fn planar(x: usize, y: usize) -> Self {
        Self { x, y, z: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Width, height and depth of a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Extent along x
    pub width: usize,
    /// Extent along y
    pub height: usize,
    /// Extent along z (1 for a single 2D layer)
    pub depth: usize,
}

impl Dimensions {
    /// Create dimensions with an explicit depth
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Create single-layer dimensions
    pub const fn planar(width: usize, height: usize) -> Self {
        Self::new(width, height, 1)
    }

    /// Total number of cells, `None` on overflow
    pub const fn cell_count(&self) -> Option<usize> {
        match self.width.checked_mul(self.height) {
            Some(layer) => layer.checked_mul(self.depth),
            None => None,
        }
    }

    /// Whether any extent is zero
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.depth == 0
    }

    /// Check if a position lies inside the grid
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height && position.z < self.depth
    }

    /// Flat index of a position, `None` when out of bounds
    pub const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.z * self.width * self.height + position.y * self.width + position.x)
        } else {
            None
        }
    }

    /// Position of a flat index, `None` when out of bounds
    pub const fn position(&self, index: usize) -> Option<Position> {
        if self.is_empty() {
            return None;
        }
        let layer = self.width * self.height;
        let z = index / layer;
        if z >= self.depth {
            return None;
        }
        let within = index % layer;
        Some(Position {
            x: within % self.width,
            y: within / self.width,
            z,
        })
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}
