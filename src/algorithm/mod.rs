/// Fixed-size bitset of possible tile types per cell
pub mod bitset;
/// Ordered index of narrowed cells for most-constrained selection
pub mod entropy;
/// Collapse loop and solver state
pub mod executor;
/// Breadth-first constraint propagation
pub mod propagation;
/// Seeded random source
pub mod selection;
