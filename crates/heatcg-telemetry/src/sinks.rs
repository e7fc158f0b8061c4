//! Pluggable event sinks.
//!
//! Sinks consume events from the bus and process them
//! (collect in memory, log through `tracing`, append to a file).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use heatcg_types::{HeatError, HeatResult};

use crate::events::{EventKind, SolverEvent};

/// Trait for event consumers.
pub trait EventSink {
    /// Process a single event.
    fn handle(&mut self, event: &SolverEvent) -> HeatResult<()>;

    /// Called when the solve ends. Flush buffers, close files, etc.
    fn finalize(&mut self) -> HeatResult<()> {
        Ok(())
    }

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events in a `Vec` for testing and inspection.
#[derive(Debug, Default)]
pub struct VecSink {
    /// Collected events.
    pub events: Vec<SolverEvent>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SolverEvent) -> HeatResult<()> {
        self.events.push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through the `tracing` crate.
///
/// Per-iteration events go to `debug`, everything else to `info`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SolverEvent) -> HeatResult<()> {
        match &event.kind {
            EventKind::Iteration { relative_residual } => {
                tracing::debug!(
                    iteration = event.iteration,
                    relative_residual,
                    "cg_iteration"
                );
            }
            kind => {
                tracing::info!(iteration = event.iteration, event = ?kind, "solver_event");
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Appends one JSON object per event to a file.
pub struct JsonLinesSink {
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// Creates (or truncates) the output file.
    pub fn create(path: impl AsRef<Path>) -> HeatResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl EventSink for JsonLinesSink {
    fn handle(&mut self, event: &SolverEvent) -> HeatResult<()> {
        let line = serde_json::to_string(event)
            .map_err(|e| HeatError::Serialization(format!("event encoding failed: {e}")))?;
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn finalize(&mut self) -> HeatResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json_lines_sink"
    }
}
