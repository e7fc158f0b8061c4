//! Dense vector arithmetic.
//!
//! Pure, allocation-returning functions over `f64` slices. Binary
//! operations require equal-length operands and report a
//! [`HeatError::DimensionMismatch`] otherwise. Reductions accumulate
//! left to right.

use heatcg_types::{HeatError, HeatResult};

fn check_lengths(x: &[f64], y: &[f64]) -> HeatResult<()> {
    if x.len() != y.len() {
        return Err(HeatError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(())
}

/// Element-wise `x + y`.
pub fn add(x: &[f64], y: &[f64]) -> HeatResult<Vec<f64>> {
    check_lengths(x, y)?;
    Ok(x.iter().zip(y).map(|(a, b)| a + b).collect())
}

/// Element-wise `x - y`.
pub fn subtract(x: &[f64], y: &[f64]) -> HeatResult<Vec<f64>> {
    check_lengths(x, y)?;
    Ok(x.iter().zip(y).map(|(a, b)| a - b).collect())
}

/// `alpha * x`.
pub fn scale(alpha: f64, x: &[f64]) -> Vec<f64> {
    x.iter().map(|v| alpha * v).collect()
}

/// Inner product `x · y`.
pub fn dot(x: &[f64], y: &[f64]) -> HeatResult<f64> {
    check_lengths(x, y)?;
    let mut sum = 0.0;
    for (a, b) in x.iter().zip(y) {
        sum += a * b;
    }
    Ok(sum)
}

/// Euclidean norm `sqrt(x · x)`.
pub fn two_norm(x: &[f64]) -> f64 {
    let mut sum = 0.0;
    for v in x {
        sum += v * v;
    }
    sum.sqrt()
}
