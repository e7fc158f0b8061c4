//! Event bus: synchronous dispatch to registered sinks.
//!
//! The solver is single-threaded, so events are handed to every sink
//! as soon as they are emitted.

use heatcg_types::HeatResult;

use crate::events::SolverEvent;
use crate::sinks::EventSink;

/// Fan-out of solver events to a set of sinks.
pub struct EventBus {
    /// Registered sinks.
    sinks: Vec<Box<dyn EventSink>>,
    /// Whether the bus is active. Disabled bus is a no-op.
    enabled: bool,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus. Disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the bus is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Dispatches an event to every sink, in registration order.
    ///
    /// Stops at the first sink error.
    pub fn emit(&mut self, event: &SolverEvent) -> HeatResult<()> {
        if !self.enabled {
            return Ok(());
        }
        for sink in &mut self.sinks {
            sink.handle(event)?;
        }
        Ok(())
    }

    /// Finalizes every sink (flushes files).
    pub fn finalize(&mut self) -> HeatResult<()> {
        for sink in &mut self.sinks {
            sink.finalize()?;
        }
        Ok(())
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Names of the registered sinks.
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
