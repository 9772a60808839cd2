//! Error types for mfasrank-core.

use thiserror::Error;

use crate::types::SystemId;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RankError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// Outcome symbol outside `<`, `>`, `=`.
    #[error("Invalid ranking symbol {symbol:?}: expected one of '<', '>', '='")]
    InvalidOutcome { symbol: String },

    /// A tournament edge refers to a vertex the solver was not given.
    /// This is a contract breach between reducer and solver, not bad input.
    #[error("Tournament edge ({tail}, {head}) references vertex {vertex:?} outside the vertex set")]
    UnknownVertex {
        tail: SystemId,
        head: SystemId,
        vertex: SystemId,
    },

    #[error("Duplicate vertex {vertex:?} in vertex set")]
    DuplicateVertex { vertex: SystemId },

    /// Exact search is exponential in the vertex count.
    #[error("Cannot rank {count} systems exactly: limit is {limit}")]
    TooManyVertices { count: usize, limit: usize },
}
