//! Error types for the heatcg workspace.
//!
//! All crates return `HeatResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for matrix assembly, solving, and I/O.
#[derive(Debug, Error)]
pub enum HeatError {
    /// Problem input is unreadable or malformed (setup failure).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two operands that must have matching lengths do not.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
    },

    /// Triplet data cannot form a valid square sparse matrix.
    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),

    /// A CSR structural invariant does not hold.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// CG recurrence produced a zero or non-finite step.
    #[error("Numerical breakdown at iteration {iteration}: {detail}")]
    NumericalBreakdown {
        iteration: usize,
        detail: String,
    },

    /// Solver exhausted its iteration budget.
    #[error("Solver did not converge after {iterations} iterations (relative residual: {residual:.2e})")]
    NotConverged {
        iterations: usize,
        residual: f64,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, HeatError>`.
pub type HeatResult<T> = Result<T, HeatError>;
