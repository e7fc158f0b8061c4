//! # heatcg-debug
//!
//! Inspection hooks called by the CG driver at iteration boundaries, and
//! the plain-text grid snapshot files written through them.

pub mod hooks;
pub mod snapshot;

pub use hooks::{HookChain, InspectionHook, NoopHook, TelemetryHook};
pub use snapshot::{snapshot_file_name, GridLayout, GridSnapshot, SnapshotHook};
