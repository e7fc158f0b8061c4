//! Conjugate Gradient solver for symmetric positive-definite systems.
//!
//! # Algorithm
//!
//! ```text
//! r = b - A*x
//! p = r
//!
//! for k in 1..=max_iterations:
//!     q     = A * p
//!     alpha = (r . r) / (p . q)
//!     x     = x + alpha * p
//!     r'    = r - alpha * q          (same q, one matvec per iteration)
//!     if ||r'||_2 / ||r_0||_2 < tol:
//!         converged; break
//!     beta  = (r' . r') / (r . r)
//!     p     = r' + beta * p
//!     r     = r'
//! ```
//!
//! [`CgState::step`] performs one iteration as a pure function of the
//! previous iterate. [`ConjugateGradient::solve`] owns the loop, the
//! stopping test, and the calls into an [`InspectionHook`], so the
//! numerical core never touches I/O.
//!
//! The matrix must be SPD; this is not checked. In exact arithmetic CG
//! converges within `n` iterations for an `n × n` SPD system, which is the
//! default iteration cap.

use tracing::{debug, info, warn};

use heatcg_debug::hooks::InspectionHook;
use heatcg_math::vector::{add, dot, scale, subtract, two_norm};
use heatcg_math::CsrMatrix;
use heatcg_types::{HeatError, HeatResult};

use crate::config::SolverConfig;

/// One CG iterate.
///
/// Vectors are replaced wholesale by [`step`](Self::step); a state is never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CgState {
    x: Vec<f64>,
    r: Vec<f64>,
    p: Vec<f64>,
    /// `r · r` of the current residual.
    rr: f64,
    iteration: usize,
}

impl CgState {
    /// Initial state: `r₀ = b − A·x₀`, `p₀ = r₀`.
    pub fn new(a: &CsrMatrix, b: &[f64], x0: Vec<f64>) -> HeatResult<Self> {
        if b.len() != a.dimension() {
            return Err(HeatError::DimensionMismatch {
                expected: a.dimension(),
                actual: b.len(),
            });
        }
        if x0.len() != b.len() {
            return Err(HeatError::DimensionMismatch {
                expected: b.len(),
                actual: x0.len(),
            });
        }

        let ax = a.mul_vec(&x0)?;
        let r = subtract(b, &ax)?;
        let rr = dot(&r, &r)?;
        Ok(Self {
            x: x0,
            p: r.clone(),
            r,
            rr,
            iteration: 0,
        })
    }

    /// Performs one CG iteration and returns the next state.
    ///
    /// # Errors
    ///
    /// [`HeatError::NumericalBreakdown`] if `p · A·p` is zero or the step
    /// length is not finite (A not SPD, or the residual already vanished).
    pub fn step(&self, a: &CsrMatrix) -> HeatResult<Self> {
        let iteration = self.iteration + 1;

        let q = a.mul_vec(&self.p)?;
        let pq = dot(&self.p, &q)?;
        let alpha = self.rr / pq;
        if pq == 0.0 || !alpha.is_finite() {
            return Err(HeatError::NumericalBreakdown {
                iteration,
                detail: format!("p·Ap = {pq:e}, r·r = {:e}", self.rr),
            });
        }

        let x = add(&self.x, &scale(alpha, &self.p))?;
        let r = subtract(&self.r, &scale(alpha, &q))?;
        let rr = dot(&r, &r)?;

        let beta = rr / self.rr;
        let p = add(&r, &scale(beta, &self.p))?;

        Ok(Self {
            x,
            r,
            p,
            rr,
            iteration,
        })
    }

    /// Current solution estimate `x_k`.
    pub fn solution(&self) -> &[f64] {
        &self.x
    }

    /// Current residual `r_k = b − A·x_k` (recurrence form).
    pub fn residual(&self) -> &[f64] {
        &self.r
    }

    /// Current search direction `p_k`.
    pub fn direction(&self) -> &[f64] {
        &self.p
    }

    /// ‖r_k‖₂.
    pub fn residual_norm(&self) -> f64 {
        two_norm(&self.r)
    }

    /// Iterations performed to reach this state.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Consumes the state, returning `x_k`.
    pub fn into_solution(self) -> Vec<f64> {
        self.x
    }
}

/// Outcome of [`ConjugateGradient::solve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the relative residual dropped below the tolerance.
    pub converged: bool,
    /// Final ‖r_k‖₂ / ‖r₀‖₂ (0 when r₀ vanished).
    pub relative_residual: f64,
    /// ‖r₀‖₂.
    pub initial_residual: f64,
}

impl SolveReport {
    /// Turns a non-converged report into [`HeatError::NotConverged`].
    pub fn into_result(self) -> HeatResult<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(HeatError::NotConverged {
                iterations: self.iterations,
                residual: self.relative_residual,
            })
        }
    }
}

/// Conjugate Gradient driver.
#[derive(Debug, Clone, Default)]
pub struct ConjugateGradient {
    config: SolverConfig,
}

impl ConjugateGradient {
    /// Creates a solver after validating `config`.
    pub fn new(config: SolverConfig) -> HeatResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `A x = b` starting from the guess in `x`.
    ///
    /// On return `x` holds the last computed iterate, whether or not the
    /// solve converged. Non-convergence is reported through
    /// [`SolveReport::converged`], not as an error.
    ///
    /// Snapshots go to `hook` every `snapshot_interval` iterations and once
    /// more at termination (unless that iteration was just snapshotted).
    ///
    /// # Errors
    ///
    /// - [`HeatError::DimensionMismatch`] if `A`, `b`, and `x` disagree.
    /// - Any error returned by `hook`; the solve stops immediately.
    pub fn solve(
        &self,
        a: &CsrMatrix,
        b: &[f64],
        x: &mut [f64],
        hook: &mut dyn InspectionHook,
    ) -> HeatResult<SolveReport> {
        let n = b.len();
        let max_iterations = self.config.max_iterations.unwrap_or(n);
        let interval = self.config.snapshot_interval;

        let mut state = CgState::new(a, b, x.to_vec())?;
        let r0 = state.residual_norm();
        debug!(dimension = n, nnz = a.nnz(), initial_residual = r0, "cg_start");
        hook.on_solve_begin(n, r0)?;

        let mut converged = false;
        let mut relative = if r0 == 0.0 { 0.0 } else { 1.0 };
        let mut last_snapshot = None;

        if r0 == 0.0 {
            converged = true;
        } else {
            while state.iteration() < max_iterations {
                state = match state.step(a) {
                    Ok(next) => next,
                    Err(e @ HeatError::NumericalBreakdown { .. }) => {
                        warn!(error = %e, "cg_breakdown");
                        break;
                    }
                    Err(e) => return Err(e),
                };

                let k = state.iteration();
                relative = state.residual_norm() / r0;
                debug!(iteration = k, relative_residual = relative, "cg_iteration");
                hook.on_iteration(k, relative)?;

                if relative < self.config.tolerance {
                    converged = true;
                    break;
                }

                if k % interval == 0 {
                    hook.on_snapshot(k, state.solution())?;
                    last_snapshot = Some(k);
                }
            }
        }

        let iterations = state.iteration();
        x.copy_from_slice(state.solution());
        if last_snapshot != Some(iterations) {
            hook.on_snapshot(iterations, x)?;
        }
        hook.on_solve_end(iterations, relative, converged)?;

        if converged {
            info!(iterations, relative_residual = relative, "cg_converged");
        } else {
            warn!(
                iterations,
                relative_residual = relative,
                tolerance = self.config.tolerance,
                "cg_not_converged"
            );
        }

        Ok(SolveReport {
            iterations,
            converged,
            relative_residual: relative,
            initial_residual: r0,
        })
    }
}
