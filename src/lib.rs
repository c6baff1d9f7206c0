//! Wave function collapse tile grid generation
//!
//! Every cell of a grid starts superposed over the tile types it may hold.
//! The most constrained cell is collapsed to one tile type, chosen at random by
//! declared weight, and the adjacency rules of that choice are propagated to
//! its neighbors. This repeats until every cell holds one tile type or some
//! cell is left with none.

#![forbid(unsafe_code)]

/// Constraint solver: possibility sets, entropy ordering, propagation and the collapse loop
pub mod algorithm;
/// Configuration, prefill and output documents, the command-line driver and error handling
pub mod io;
/// Grid geometry, adjacency topology, tile catalog and grid state
pub mod spatial;

pub use algorithm::executor::{SolverState, WaveCollapse};
pub use io::error::{AlgorithmError, Result};
pub use spatial::{Catalog, Dimensions, Grid, Position};
