//! Layout failures.
//!
//! Every failure is fatal: the pipeline reports the first error and returns no
//! partial result.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("graph is not acyclic after cycle breaking")]
    NotAcyclic,

    #[error("no entering edge found for leaving tree edge {v} -> {w}")]
    NoEnterEdge { v: String, w: String },

    #[error("network simplex did not converge within {limit} pivots")]
    PivotLimit { limit: usize },

    #[error("rank constraints are infeasible: {message}")]
    RankConstraintInfeasible { message: String },
}
