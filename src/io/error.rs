//! Error types for catalog loading, solving and file handling

use crate::spatial::dimensions::Position;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all algorithm operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Direction requested between positions that are not neighbors
    InvalidAdjacency {
        /// Position the direction starts from
        from: Position,
        /// Position the direction points to
        to: Position,
    },

    /// Adjacency selector names a topology that does not exist
    UnsupportedAdjacency {
        /// Selector as written in the configuration
        selector: String,
    },

    /// Weighted pick asked to choose among zero candidates
    EmptyCandidates,

    /// Propagation emptied the possibility set of an unresolved cell
    ///
    /// Expected outcome of some random paths through a rule set. A caller may
    /// retry with another seed.
    Contradiction {
        /// Cell left without any legal tile type
        position: Position,
        /// Neighbor whose constraint emptied the cell, if any
        neighbor: Option<Position>,
        /// Solver iteration when this occurred
        iteration: usize,
    },

    /// Tile type table is malformed
    InvalidConfiguration {
        /// Description of what's wrong with the table
        reason: String,
    },

    /// Tile index exceeds the catalog
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tile types in the catalog
        max_tiles: usize,
    },

    /// Request parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Run stopped by the caller's iteration budget before finishing
    IterationBudgetExceeded {
        /// Number of iterations that were allowed
        budget: usize,
    },

    /// JSON document could not be parsed or produced
    Serialization {
        /// File involved, `<unknown>` for in-memory documents
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Solver state violated one of its own invariants
    InternalInvariant {
        /// Name of the operation that detected the violation
        operation: &'static str,
        /// Description of the violation
        reason: String,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAdjacency { from, to } => {
                write!(f, "Positions {from} and {to} are not adjacent")
            }
            Self::UnsupportedAdjacency { selector } => {
                write!(f, "Adjacency '{selector}' is not supported")
            }
            Self::EmptyCandidates => {
                write!(f, "Weighted pick requires at least one candidate")
            }
            Self::Contradiction {
                position,
                neighbor,
                iteration,
            } => match neighbor {
                Some(neighbor) => write!(
                    f,
                    "Contradiction at {position} from neighbor {neighbor} (iteration {iteration})"
                ),
                None => write!(
                    f,
                    "Contradiction at {position}: no legal tile type (iteration {iteration})"
                ),
            },
            Self::InvalidConfiguration { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (tile types: {max_tiles})")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::IterationBudgetExceeded { budget } => {
                write!(f, "Generation did not finish within {budget} iterations")
            }
            Self::Serialization { path, source } => {
                write!(f, "Invalid JSON in '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InternalInvariant { operation, reason } => {
                write!(f, "Internal invariant violated in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<serde_json::Error> for AlgorithmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl AlgorithmError {
    /// Whether this is a contradiction reached by the solver
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid configuration error
pub fn invalid_configuration(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidConfiguration {
        reason: reason.to_string(),
    }
}

/// Create an internal invariant error
pub fn internal_error(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InternalInvariant {
        operation,
        reason: reason.to_string(),
    }
}
