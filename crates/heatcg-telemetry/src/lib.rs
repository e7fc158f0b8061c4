//! # heatcg-telemetry
//!
//! Structured solver events (solve start, per-iteration residual,
//! snapshots, convergence) and pluggable sinks that consume them
//! (in-memory, `tracing`, JSON lines).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SolverEvent};
