//! Finite-difference assembly of the heat system.
//!
//! The plate is discretized on an `nx × ny` grid of interior unknowns,
//! periodic in x, with a constant-temperature hot boundary above row 0 and
//! a shaped cold boundary below row `ny − 1`. The 5-point Laplacian
//! stencil is assembled in two passes (horizontal, then vertical), each
//! contributing half of the diagonal; the converter merges the duplicate
//! diagonal triplets.
//!
//! ```text
//!        hot:  Th   Th   Th   ...
//! j = 0       k=0  k=1  k=2  ...   (wraps in x)
//! j = 1       k=nx ...
//!  ...
//!       cold:  Tc·(2 − exp(−10·(x − L/2)²)),  x = i·h
//! ```

use tracing::info;

use heatcg_debug::hooks::InspectionHook;
use heatcg_debug::snapshot::GridLayout;
use heatcg_math::{CsrMatrix, TripletBuilder};
use heatcg_solver::{ConjugateGradient, SolveReport, SolverConfig};
use heatcg_types::constants::{
    COLD_PROFILE_DECAY, STENCIL_CENTER, STENCIL_NEIGHBOR, STENCIL_TRIPLETS_PER_UNKNOWN,
};
use heatcg_types::HeatResult;

use crate::contract::HeatParams;
use crate::validator::validate_params;

/// Assembled `A x = b` system for one heat problem.
#[derive(Debug, Clone)]
pub struct HeatSystem {
    pub params: HeatParams,
    pub nx: usize,
    pub ny: usize,
    /// `1 / h²`.
    pub grid_scale: f64,
    pub matrix: CsrMatrix,
    pub rhs: Vec<f64>,
    pub layout: GridLayout,
}

impl HeatSystem {
    /// Validates `params` and assembles the matrix, right-hand side, and
    /// snapshot layout.
    ///
    /// Grids whose size overflows or exceeds the unknown cap are rejected
    /// by validation before anything is allocated.
    pub fn assemble(params: &HeatParams) -> HeatResult<Self> {
        validate_params(params)?;

        let nx = params.nx();
        let ny = params.ny();
        let n = nx * ny;
        let hs = params.grid_scale();
        let half_center = 0.5 * STENCIL_CENTER * hs;
        let neighbor = STENCIL_NEIGHBOR * hs;

        let hot = vec![params.hot_temperature; nx];
        let cold = cold_profile(params, nx);

        let mut builder = TripletBuilder::with_dimension(n);
        builder.reserve(STENCIL_TRIPLETS_PER_UNKNOWN * n);
        let mut rhs = vec![0.0; n];

        // Horizontal pass, periodic in x.
        for j in 0..ny {
            for i in 0..nx {
                let k = j * nx + i;
                builder.add_entry(k, k, half_center);
                for nb in horizontal_neighbors(i, nx) {
                    builder.add_entry(k, j * nx + nb, neighbor);
                }
            }
        }

        // Vertical pass; boundary neighbors move to the right-hand side.
        for j in 0..ny {
            for i in 0..nx {
                let k = j * nx + i;
                builder.add_entry(k, k, half_center);
                if j > 0 {
                    builder.add_entry(k, k - nx, neighbor);
                } else {
                    rhs[k] += hs * hot[i];
                }
                if j + 1 < ny {
                    builder.add_entry(k, k + nx, neighbor);
                } else {
                    rhs[k] += hs * cold[i];
                }
            }
        }

        let matrix = builder.into_csr()?;
        let layout = GridLayout::new(nx, ny, hot, cold)?;

        info!(nx, ny, unknowns = n, nnz = matrix.nnz(), grid_scale = hs, "heat_system_assembled");

        Ok(Self {
            params: *params,
            nx,
            ny,
            grid_scale: hs,
            matrix,
            rhs,
            layout,
        })
    }

    /// Number of unknowns, `nx * ny`.
    pub fn unknowns(&self) -> usize {
        self.rhs.len()
    }

    /// Runs CG from a uniform guess of `config.initial_guess`.
    ///
    /// Returns the final iterate with the solve report; a non-converged
    /// solve is not an error here.
    pub fn solve(
        &self,
        config: &SolverConfig,
        hook: &mut dyn InspectionHook,
    ) -> HeatResult<(Vec<f64>, SolveReport)> {
        let solver = ConjugateGradient::new(config.clone())?;
        let mut x = vec![config.initial_guess; self.unknowns()];
        let report = solver.solve(&self.matrix, &self.rhs, &mut x, hook)?;
        Ok((x, report))
    }
}

/// Cold-boundary temperatures, one per grid column.
fn cold_profile(params: &HeatParams, nx: usize) -> Vec<f64> {
    let center = params.length / 2.0;
    (0..nx)
        .map(|i| {
            let x = i as f64 * params.spacing;
            params.cold_temperature * (2.0 - (-COLD_PROFILE_DECAY * (x - center).powi(2)).exp())
        })
        .collect()
}

/// Distinct x-neighbors of column `i` on a periodic row of `nx` points.
fn horizontal_neighbors(i: usize, nx: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(2);
    for nb in [(i + nx - 1) % nx, (i + 1) % nx] {
        if nb != i && !out.contains(&nb) {
            out.push(nb);
        }
    }
    out
}
