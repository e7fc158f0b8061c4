//! Problem input contract.
//!
//! The plain-text input format is five whitespace-separated numbers:
//!
//! ```text
//! L  W  h  Tc  Th
//! ```
//!
//! plate length, plate width, grid spacing, cold-boundary temperature
//! scale, and hot-boundary temperature. The same fields can be given as a
//! TOML table in a `.toml` file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use heatcg_types::{HeatError, HeatResult};

const FIELD_NAMES: [&str; 5] = ["L", "W", "h", "Tc", "Th"];

/// Physical parameters of the heat problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatParams {
    /// Plate length along x (periodic direction).
    pub length: f64,
    /// Plate width along y, between the hot and cold boundaries.
    pub width: f64,
    /// Grid spacing `h`.
    pub spacing: f64,
    /// Cold-boundary temperature scale `Tc`.
    pub cold_temperature: f64,
    /// Hot-boundary temperature `Th`.
    pub hot_temperature: f64,
}

impl HeatParams {
    /// Parses the plain-text `L W h Tc Th` format.
    pub fn parse(text: &str) -> HeatResult<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != FIELD_NAMES.len() {
            return Err(HeatError::InvalidInput(format!(
                "expected {} values (L W h Tc Th), found {}",
                FIELD_NAMES.len(),
                tokens.len()
            )));
        }

        let mut values = [0.0; 5];
        for (slot, (token, name)) in values.iter_mut().zip(tokens.iter().zip(FIELD_NAMES)) {
            *slot = token.parse().map_err(|_| {
                HeatError::InvalidInput(format!("{name} = '{token}' is not a number"))
            })?;
        }

        let [length, width, spacing, cold_temperature, hot_temperature] = values;
        Ok(Self {
            length,
            width,
            spacing,
            cold_temperature,
            hot_temperature,
        })
    }

    /// Parses a TOML table with the struct's field names.
    pub fn from_toml_str(text: &str) -> HeatResult<Self> {
        toml::from_str(text).map_err(|e| HeatError::InvalidInput(format!("heat parameters: {e}")))
    }

    /// Reads an input file; `.toml` files are parsed as TOML, anything
    /// else as the plain-text format.
    pub fn load(path: impl AsRef<Path>) -> HeatResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            HeatError::InvalidInput(format!("cannot read {}: {e}", path.display()))
        })?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_toml_str(&text)
        } else {
            Self::parse(&text)
        }
    }

    /// Interior points per grid row, `ceil(L / h)`.
    pub fn nx(&self) -> usize {
        (self.length / self.spacing).ceil() as usize
    }

    /// Interior grid rows, `ceil(W / h) - 1`.
    pub fn ny(&self) -> usize {
        ((self.width / self.spacing).ceil() as usize).saturating_sub(1)
    }

    /// Number of unknowns `nx * ny`, or `None` on overflow.
    pub fn unknowns(&self) -> Option<usize> {
        self.nx().checked_mul(self.ny())
    }

    /// Stencil scale `1 / h²`.
    pub fn grid_scale(&self) -> f64 {
        1.0 / (self.spacing * self.spacing)
    }
}

/// Parses the plain-text `L W h Tc Th` format.
pub fn parse_params(text: &str) -> HeatResult<HeatParams> {
    HeatParams::parse(text)
}

/// Reads heat parameters from a plain-text or `.toml` file.
pub fn load_params(path: impl AsRef<Path>) -> HeatResult<HeatParams> {
    HeatParams::load(path)
}
