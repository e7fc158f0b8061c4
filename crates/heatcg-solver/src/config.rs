//! Solver configuration.
//!
//! Parameters that control the CG driver: stopping tolerance, snapshot
//! cadence, iteration cap, and the initial guess used by problem setup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use heatcg_types::constants::{DEFAULT_INITIAL_GUESS, DEFAULT_SNAPSHOT_INTERVAL, DEFAULT_TOLERANCE};
use heatcg_types::{HeatError, HeatResult};

/// Configuration for the CG solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Relative residual tolerance. The solve stops once
    /// ‖r_k‖₂ / ‖r₀‖₂ < tolerance.
    pub tolerance: f64,

    /// An intermediate snapshot is emitted every `snapshot_interval` iterations.
    pub snapshot_interval: usize,

    /// Iteration cap. `None` means the system dimension.
    pub max_iterations: Option<usize>,

    /// Value of every entry of the initial guess.
    pub initial_guess: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL,
            max_iterations: None,
            initial_guess: DEFAULT_INITIAL_GUESS,
        }
    }
}

impl SolverConfig {
    /// Creates a config for debugging (looser tolerance, a snapshot every iteration).
    pub fn debug() -> Self {
        Self {
            tolerance: 1e-3,
            snapshot_interval: 1,
            ..Default::default()
        }
    }

    /// Creates a high-accuracy config.
    pub fn high_quality() -> Self {
        Self {
            tolerance: 1e-10,
            ..Default::default()
        }
    }

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> HeatResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| HeatError::Serialization(format!("solver config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> HeatResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> HeatResult<String> {
        toml::to_string(self).map_err(|e| HeatError::Serialization(format!("solver config: {e}")))
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> HeatResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(HeatError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.snapshot_interval == 0 {
            return Err(HeatError::InvalidConfig(
                "snapshot_interval must be >= 1".into(),
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(HeatError::InvalidConfig(
                "max_iterations must be >= 1 when set".into(),
            ));
        }
        if !self.initial_guess.is_finite() {
            return Err(HeatError::InvalidConfig(
                "initial_guess must be finite".into(),
            ));
        }
        Ok(())
    }
}
