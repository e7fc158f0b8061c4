//! # heatcg-math
//!
//! Linear algebra primitives for the heatcg solver.
//!
//! Provides:
//! - Dense vector arithmetic (add, subtract, scale, dot, 2-norm)
//! - COO triplet builder for matrix assembly
//! - In-place COO → CSR conversion (bucket distribution + per-row merge)
//! - CSR sparse matrix with matrix-vector multiplication

pub mod convert;
pub mod sparse;
pub mod triplet;
pub mod vector;

pub use convert::{convert_to_csr, coo_to_csr};
pub use sparse::CsrMatrix;
pub use triplet::TripletBuilder;
