//! # heatcg-io
//!
//! Problem input for the 2D steady-state heat equation, its validation,
//! and the finite-difference assembly of the `Ax = b` system.
//!
//! ```text
//! input file ──► HeatParams ──► validate_params ──► HeatSystem::assemble
//!                                                      │
//!                                          CsrMatrix, rhs, GridLayout
//! ```

pub mod contract;
pub mod setup;
pub mod validator;

pub use contract::{load_params, parse_params, HeatParams};
pub use setup::HeatSystem;
pub use validator::validate_params;
