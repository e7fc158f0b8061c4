//! Input validation.
//!
//! Rejects parameter sets that cannot produce a solvable grid before any
//! matrix is assembled.

use heatcg_types::constants::{MAX_GRID_UNKNOWNS, STENCIL_TRIPLETS_PER_UNKNOWN};
use heatcg_types::{HeatError, HeatResult};

use crate::contract::HeatParams;

/// Validates heat problem parameters.
///
/// Checks:
/// - `L`, `W`, `h` are positive and finite, and `h <= L`
/// - both temperatures are finite
/// - the grid has at least one interior row
/// - the grid has at most [`MAX_GRID_UNKNOWNS`] unknowns
pub fn validate_params(params: &HeatParams) -> HeatResult<()> {
    for (name, value) in [
        ("length", params.length),
        ("width", params.width),
        ("spacing", params.spacing),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(HeatError::InvalidInput(format!(
                "{name} must be positive and finite, got {value}"
            )));
        }
    }
    for (name, value) in [
        ("cold_temperature", params.cold_temperature),
        ("hot_temperature", params.hot_temperature),
    ] {
        if !value.is_finite() {
            return Err(HeatError::InvalidInput(format!(
                "{name} must be finite, got {value}"
            )));
        }
    }

    if params.spacing > params.length {
        return Err(HeatError::InvalidInput(format!(
            "spacing {} exceeds plate length {}",
            params.spacing, params.length
        )));
    }
    if params.ny() == 0 {
        return Err(HeatError::InvalidInput(format!(
            "width {} with spacing {} leaves no interior grid rows",
            params.width, params.spacing
        )));
    }

    let unknowns = params
        .unknowns()
        .filter(|&n| n <= MAX_GRID_UNKNOWNS)
        .and_then(|n| n.checked_mul(STENCIL_TRIPLETS_PER_UNKNOWN).map(|_| n));
    if unknowns.is_none() {
        return Err(HeatError::InvalidInput(format!(
            "grid {} x {} exceeds {MAX_GRID_UNKNOWNS} unknowns",
            params.nx(),
            params.ny()
        )));
    }

    Ok(())
}
