//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Grid extents and positions
//! - Neighbor topology
//! - Grid state management
//! - Tile type definitions

/// Neighbor topology between cells
pub mod adjacency;
/// Grid extents, positions and flat indexing
pub mod dimensions;
/// Grid state management and manipulation functions
pub mod grid;
/// Tile type definitions and weighted selection
pub mod tiles;

pub use dimensions::{Dimensions, Position};
pub use grid::Grid;
pub use tiles::Catalog;
