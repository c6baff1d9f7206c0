/// Command-line driver
pub mod cli;
/// Runtime defaults and the tile configuration format
pub mod configuration;
/// Error types
pub mod error;
/// Generated grid document
pub mod output;
/// Per-position starting constraints
pub mod prefill;
/// Terminal progress display
pub mod progress;
