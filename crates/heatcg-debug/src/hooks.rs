//! Inspection hooks for the solver loop.
//!
//! Hooks are invoked by the CG driver at defined points so that snapshot
//! writing, telemetry, and diagnostics stay out of the numerical code.

use heatcg_telemetry::events::{EventKind, SolverEvent};
use heatcg_telemetry::EventBus;
use heatcg_types::HeatResult;

/// Trait for solver inspection hooks.
///
/// Hooks observe the solve; they never modify solver state. Any error a
/// hook returns aborts the solve and is propagated to the caller.
///
/// # Lifecycle
///
/// ```text
/// hook.on_solve_begin(...)
/// for each CG iteration k:
///   hook.on_iteration(k, ...)
///   if k % interval == 0 or terminating:
///     hook.on_snapshot(k, x_k)
/// hook.on_solve_end(...)
/// ```
pub trait InspectionHook {
    /// Called once after the initial residual is computed.
    fn on_solve_begin(&mut self, dimension: usize, initial_residual: f64) -> HeatResult<()> {
        let _ = (dimension, initial_residual);
        Ok(())
    }

    /// Called after each CG iteration.
    fn on_iteration(&mut self, iteration: usize, relative_residual: f64) -> HeatResult<()> {
        let _ = (iteration, relative_residual);
        Ok(())
    }

    /// Called with the current iterate at snapshot points.
    fn on_snapshot(&mut self, iteration: usize, solution: &[f64]) -> HeatResult<()> {
        let _ = (iteration, solution);
        Ok(())
    }

    /// Called once when the solve terminates.
    fn on_solve_end(
        &mut self,
        iterations: usize,
        relative_residual: f64,
        converged: bool,
    ) -> HeatResult<()> {
        let _ = (iterations, relative_residual, converged);
        Ok(())
    }

    /// Returns the hook's name for logging.
    fn name(&self) -> &str;
}

/// Hook that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl InspectionHook for NoopHook {
    fn name(&self) -> &str {
        "noop_hook"
    }
}

/// Hook that turns solver callbacks into telemetry events.
///
/// Events are kept for [`drain_events`](Self::drain_events) and, when a
/// bus is attached, dispatched to its sinks immediately.
pub struct TelemetryHook {
    events: Vec<SolverEvent>,
    bus: Option<EventBus>,
}

impl TelemetryHook {
    /// Creates a hook that only collects events.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            bus: None,
        }
    }

    /// Creates a hook that also forwards every event to `bus`.
    pub fn with_bus(bus: EventBus) -> Self {
        Self {
            events: Vec::new(),
            bus: Some(bus),
        }
    }

    /// Drains collected events.
    pub fn drain_events(&mut self) -> Vec<SolverEvent> {
        std::mem::take(&mut self.events)
    }

    /// Detaches the bus, if any.
    pub fn into_bus(self) -> Option<EventBus> {
        self.bus
    }

    fn record(&mut self, event: SolverEvent) -> HeatResult<()> {
        if let Some(bus) = self.bus.as_mut() {
            bus.emit(&event)?;
        }
        self.events.push(event);
        Ok(())
    }
}

impl Default for TelemetryHook {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectionHook for TelemetryHook {
    fn on_solve_begin(&mut self, dimension: usize, initial_residual: f64) -> HeatResult<()> {
        self.record(SolverEvent::new(
            0,
            EventKind::SolveBegin {
                dimension,
                initial_residual,
            },
        ))
    }

    fn on_iteration(&mut self, iteration: usize, relative_residual: f64) -> HeatResult<()> {
        self.record(SolverEvent::new(
            iteration,
            EventKind::Iteration { relative_residual },
        ))
    }

    fn on_snapshot(&mut self, iteration: usize, _solution: &[f64]) -> HeatResult<()> {
        self.record(SolverEvent::new(iteration, EventKind::Snapshot))
    }

    fn on_solve_end(
        &mut self,
        iterations: usize,
        relative_residual: f64,
        converged: bool,
    ) -> HeatResult<()> {
        self.record(SolverEvent::new(
            iterations,
            EventKind::Convergence {
                iterations,
                final_residual: relative_residual,
                converged,
            },
        ))?;
        if let Some(bus) = self.bus.as_mut() {
            bus.finalize()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}

/// Fans every callback out to several borrowed hooks, in order.
///
/// Stops at the first hook that returns an error.
#[derive(Default)]
pub struct HookChain<'a> {
    hooks: Vec<&'a mut dyn InspectionHook>,
}

impl<'a> HookChain<'a> {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Appends a hook to the chain.
    pub fn push(&mut self, hook: &'a mut dyn InspectionHook) {
        self.hooks.push(hook);
    }

    /// Number of chained hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl InspectionHook for HookChain<'_> {
    fn on_solve_begin(&mut self, dimension: usize, initial_residual: f64) -> HeatResult<()> {
        for hook in &mut self.hooks {
            hook.on_solve_begin(dimension, initial_residual)?;
        }
        Ok(())
    }

    fn on_iteration(&mut self, iteration: usize, relative_residual: f64) -> HeatResult<()> {
        for hook in &mut self.hooks {
            hook.on_iteration(iteration, relative_residual)?;
        }
        Ok(())
    }

    fn on_snapshot(&mut self, iteration: usize, solution: &[f64]) -> HeatResult<()> {
        for hook in &mut self.hooks {
            hook.on_snapshot(iteration, solution)?;
        }
        Ok(())
    }

    fn on_solve_end(
        &mut self,
        iterations: usize,
        relative_residual: f64,
        converged: bool,
    ) -> HeatResult<()> {
        for hook in &mut self.hooks {
            hook.on_solve_end(iterations, relative_residual, converged)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "hook_chain"
    }
}
