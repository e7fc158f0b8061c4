//! # heatcg-solver
//!
//! Conjugate Gradient for symmetric positive-definite systems stored as
//! [`CsrMatrix`](heatcg_math::CsrMatrix).
//!
//! ## Key Types
//!
//! - [`CgState`]: one CG iterate; [`CgState::step`] is pure
//! - [`ConjugateGradient`]: drives the iteration, stopping test, and hooks
//! - [`SolveReport`]: iterations, convergence flag, final residual
//! - [`SolverConfig`]: tolerance, snapshot cadence, iteration cap

pub mod cg;
pub mod config;

pub use cg::{CgState, ConjugateGradient, SolveReport};
pub use config::SolverConfig;
