pub mod adjacency;
pub mod dimensions;
pub mod tiles;
