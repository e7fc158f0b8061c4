//! # heatcg-types
//!
//! Shared error type and numerical defaults for the heatcg workspace.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that all other heatcg crates share.

pub mod constants;
pub mod error;

pub use error::{HeatError, HeatResult};
