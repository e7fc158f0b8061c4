//! Solver event types.
//!
//! Lightweight value types emitted by the CG driver at iteration
//! boundaries. They carry just enough data to follow convergence.

use serde::{Deserialize, Serialize};

/// An event emitted by the solver, tagged with its iteration number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverEvent {
    /// CG iteration (0 = before the first iteration).
    pub iteration: usize,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Solve started.
    SolveBegin {
        /// System dimension.
        dimension: usize,
        /// ‖b − A·x₀‖₂, the normalization baseline.
        initial_residual: f64,
    },

    /// One CG iteration completed.
    Iteration {
        /// ‖r_k‖₂ / ‖r₀‖₂.
        relative_residual: f64,
    },

    /// The current iterate was handed to the snapshot writers.
    Snapshot,

    /// Solve finished.
    Convergence {
        /// Iterations performed.
        iterations: usize,
        /// Final relative residual.
        final_residual: f64,
        /// Whether the tolerance was met.
        converged: bool,
    },
}

impl SolverEvent {
    /// Creates a new event for the given iteration.
    pub fn new(iteration: usize, kind: EventKind) -> Self {
        Self { iteration, kind }
    }
}
