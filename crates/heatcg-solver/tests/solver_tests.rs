//! Integration tests for heatcg-solver.

use approx::assert_relative_eq;

use heatcg_debug::hooks::{InspectionHook, NoopHook, TelemetryHook};
use heatcg_math::vector::{subtract, two_norm};
use heatcg_math::{CsrMatrix, TripletBuilder};
use heatcg_solver::cg::{CgState, ConjugateGradient};
use heatcg_solver::config::SolverConfig;
use heatcg_telemetry::events::EventKind;
use heatcg_types::{HeatError, HeatResult};

// ─── Helpers ──────────────────────────────────────────────────

/// 1D Dirichlet Laplacian: tridiag(-1, 2, -1).
fn laplacian_1d(n: usize) -> CsrMatrix {
    let mut b = TripletBuilder::with_dimension(n);
    for i in 0..n {
        b.add_entry(i, i, 2.0);
        if i > 0 {
            b.add_entry(i, i - 1, -1.0);
        }
        if i + 1 < n {
            b.add_entry(i, i + 1, -1.0);
        }
    }
    b.into_csr().unwrap()
}

/// 2D Dirichlet Laplacian on an m × m grid (5-point stencil).
fn laplacian_2d(m: usize) -> CsrMatrix {
    let mut b = TripletBuilder::with_dimension(m * m);
    for j in 0..m {
        for i in 0..m {
            let k = j * m + i;
            b.add_entry(k, k, 4.0);
            if i > 0 {
                b.add_entry(k, k - 1, -1.0);
            }
            if i + 1 < m {
                b.add_entry(k, k + 1, -1.0);
            }
            if j > 0 {
                b.add_entry(k, k - m, -1.0);
            }
            if j + 1 < m {
                b.add_entry(k, k + m, -1.0);
            }
        }
    }
    b.into_csr().unwrap()
}

fn true_relative_residual(a: &CsrMatrix, x: &[f64], b: &[f64]) -> f64 {
    let ax = a.mul_vec(x).unwrap();
    two_norm(&subtract(&ax, b).unwrap()) / two_norm(b)
}

fn solver(tolerance: f64) -> ConjugateGradient {
    ConjugateGradient::new(SolverConfig {
        tolerance,
        ..Default::default()
    })
    .unwrap()
}

/// Records the iteration of every snapshot callback.
#[derive(Default)]
struct SnapshotRecorder {
    iterations: Vec<usize>,
    last: Vec<f64>,
    ends: usize,
}

impl InspectionHook for SnapshotRecorder {
    fn on_snapshot(&mut self, iteration: usize, solution: &[f64]) -> HeatResult<()> {
        self.iterations.push(iteration);
        self.last = solution.to_vec();
        Ok(())
    }

    fn on_solve_end(&mut self, _: usize, _: f64, _: bool) -> HeatResult<()> {
        self.ends += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "snapshot_recorder"
    }
}

/// Fails on the first snapshot.
struct FailingHook;

impl InspectionHook for FailingHook {
    fn on_snapshot(&mut self, _: usize, _: &[f64]) -> HeatResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }

    fn name(&self) -> &str {
        "failing_hook"
    }
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config() {
    let config = SolverConfig::default();
    assert_eq!(config.tolerance, 1e-5);
    assert_eq!(config.snapshot_interval, 10);
    assert_eq!(config.max_iterations, None);
    assert_eq!(config.initial_guess, 1.0);
    assert!(config.validate().is_ok());
}

#[test]
fn config_presets_are_valid() {
    assert!(SolverConfig::debug().validate().is_ok());
    assert!(SolverConfig::high_quality().validate().is_ok());
    assert!(SolverConfig::high_quality().tolerance < SolverConfig::default().tolerance);
}

#[test]
fn config_from_partial_toml() {
    let config = SolverConfig::from_toml_str("tolerance = 1e-8\nmax_iterations = 50\n").unwrap();
    assert_eq!(config.tolerance, 1e-8);
    assert_eq!(config.max_iterations, Some(50));
    assert_eq!(config.snapshot_interval, 10);
}

#[test]
fn config_toml_round_trip() {
    let config = SolverConfig {
        snapshot_interval: 5,
        ..SolverConfig::high_quality()
    };
    let text = config.to_toml_string().unwrap();
    assert_eq!(SolverConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn config_rejects_bad_values() {
    for text in [
        "tolerance = 0.0",
        "tolerance = -1.0",
        "snapshot_interval = 0",
        "max_iterations = 0",
    ] {
        assert!(
            matches!(SolverConfig::from_toml_str(text), Err(HeatError::InvalidConfig(_))),
            "{text} should be rejected"
        );
    }
    assert!(matches!(
        SolverConfig::from_toml_str("tolerance = \"tight\""),
        Err(HeatError::Serialization(_))
    ));
}

#[test]
fn config_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solver.toml");
    std::fs::write(&path, "snapshot_interval = 3\n").unwrap();
    assert_eq!(SolverConfig::load(&path).unwrap().snapshot_interval, 3);
}

// ─── CgState Tests ────────────────────────────────────────────

#[test]
fn initial_state() {
    let a = laplacian_1d(3);
    let state = CgState::new(&a, &[1.0, 0.0, 1.0], vec![0.0; 3]).unwrap();
    assert_eq!(state.iteration(), 0);
    assert_eq!(state.residual(), &[1.0, 0.0, 1.0]);
    assert_eq!(state.direction(), state.residual());
    assert_relative_eq!(state.residual_norm(), 2.0f64.sqrt());
}

#[test]
fn step_is_pure() {
    let a = laplacian_1d(6);
    let state = CgState::new(&a, &[1.0; 6], vec![0.0; 6]).unwrap();
    let before = state.clone();
    let s1 = state.step(&a).unwrap();
    let s2 = state.step(&a).unwrap();
    assert_eq!(state, before);
    assert_eq!(s1, s2);
    assert_eq!(s1.iteration(), 1);
}

#[test]
fn step_residual_matches_true_residual() {
    let a = laplacian_2d(4);
    let b: Vec<f64> = (0..16).map(|i| i as f64).collect();
    let mut state = CgState::new(&a, &b, vec![0.0; 16]).unwrap();
    for _ in 0..5 {
        state = state.step(&a).unwrap();
    }
    let ax = a.mul_vec(state.solution()).unwrap();
    let r_true = subtract(&b, &ax).unwrap();
    for (got, want) in state.residual().iter().zip(&r_true) {
        assert!((got - want).abs() < 1e-9, "{got} vs {want}");
    }
}

#[test]
fn state_rejects_mismatched_lengths() {
    let a = laplacian_1d(3);
    assert!(matches!(
        CgState::new(&a, &[1.0; 2], vec![0.0; 2]),
        Err(HeatError::DimensionMismatch { expected: 3, actual: 2 })
    ));
    assert!(matches!(
        CgState::new(&a, &[1.0; 3], vec![0.0; 4]),
        Err(HeatError::DimensionMismatch { expected: 3, actual: 4 })
    ));
}

// ─── Convergence Tests ────────────────────────────────────────

#[test]
fn converges_on_1d_laplacian() {
    let n = 20;
    let a = laplacian_1d(n);
    let b = vec![1.0; n];
    let mut x = vec![0.0; n];

    let report = solver(1e-12).solve(&a, &b, &mut x, &mut NoopHook).unwrap();

    assert!(report.converged);
    assert!(report.iterations <= n);
    assert!(report.relative_residual < 1e-12);
    assert!(true_relative_residual(&a, &x, &b) < 1e-10);

    // Exact solution of tridiag(-1,2,-1) x = 1 is x_i = (i+1)(n-i)/2.
    for (i, xi) in x.iter().enumerate() {
        let exact = ((i + 1) * (n - i)) as f64 / 2.0;
        assert_relative_eq!(*xi, exact, max_relative = 1e-8);
    }
}

#[test]
fn converges_on_2d_laplacian() {
    let a = laplacian_2d(5);
    let n = a.dimension();
    let b: Vec<f64> = (0..n).map(|i| 1.0 + (i % 3) as f64).collect();
    let mut x = vec![0.0; n];

    let report = solver(1e-10).solve(&a, &b, &mut x, &mut NoopHook).unwrap();

    assert!(report.converged);
    assert!(report.iterations <= n);
    assert!(true_relative_residual(&a, &x, &b) < 1e-8);
}

#[test]
fn two_by_two_converges_in_at_most_two_iterations() {
    let a = CsrMatrix::from_raw_parts(2, vec![0, 2, 4], vec![0, 1, 0, 1], vec![4.0, 1.0, 1.0, 3.0])
        .unwrap();
    let b = [1.0, 2.0];
    let mut x = vec![0.0; 2];
    let report = solver(1e-12).solve(&a, &b, &mut x, &mut NoopHook).unwrap();

    assert!(report.converged);
    assert!(report.iterations <= 2);
    // [4 1; 1 3]^-1 [1; 2] = [1/11, 7/11]
    assert_relative_eq!(x[0], 1.0 / 11.0, epsilon = 1e-10);
    assert_relative_eq!(x[1], 7.0 / 11.0, epsilon = 1e-10);
}

#[test]
fn exact_initial_guess_needs_no_iterations() {
    let a = CsrMatrix::identity(3);
    let b = [1.0, 2.0, 3.0];
    let mut x = b.to_vec();
    let mut hook = SnapshotRecorder::default();

    let report = solver(1e-5).solve(&a, &b, &mut x, &mut hook).unwrap();

    assert!(report.converged);
    assert_eq!(report.iterations, 0);
    assert_eq!(hook.iterations, vec![0]);
    assert_eq!(x, b.to_vec());
}

#[test]
fn empty_system_converges_trivially() {
    let a = TripletBuilder::new().into_csr().unwrap();
    let mut x: Vec<f64> = Vec::new();
    let report = solver(1e-5).solve(&a, &[], &mut x, &mut NoopHook).unwrap();
    assert!(report.converged);
    assert_eq!(report.iterations, 0);
}

// ─── Failure Tests ────────────────────────────────────────────

#[test]
fn iteration_cap_reports_non_convergence_and_keeps_iterate() {
    let n = 20;
    let a = laplacian_1d(n);
    let b = vec![1.0; n];
    let mut x = vec![0.0; n];
    let cg = ConjugateGradient::new(SolverConfig {
        tolerance: 1e-12,
        max_iterations: Some(2),
        ..Default::default()
    })
    .unwrap();
    let mut hook = SnapshotRecorder::default();

    let report = cg.solve(&a, &b, &mut x, &mut hook).unwrap();

    assert!(!report.converged);
    assert_eq!(report.iterations, 2);
    assert!(report.relative_residual >= 1e-12);

    let expected = CgState::new(&a, &b, vec![0.0; n])
        .and_then(|s| s.step(&a))
        .and_then(|s| s.step(&a))
        .unwrap();
    assert_eq!(x, expected.solution());
    assert_eq!(hook.iterations, vec![2]);
    assert_eq!(hook.last, x);

    assert!(matches!(
        report.into_result(),
        Err(HeatError::NotConverged { iterations: 2, .. })
    ));
}

#[test]
fn breakdown_stops_without_error() {
    // Zero matrix: p·Ap = 0 on the first step.
    let a = CsrMatrix::from_raw_parts(2, vec![0, 0, 0], vec![], vec![]).unwrap();
    let mut x = vec![0.0; 2];
    let mut hook = SnapshotRecorder::default();
    let report = solver(1e-5).solve(&a, &[1.0, 1.0], &mut x, &mut hook).unwrap();

    assert!(!report.converged);
    assert_eq!(report.iterations, 0);
    assert_eq!(report.relative_residual, 1.0);
    assert_eq!(x, vec![0.0, 0.0]);
    assert_eq!(hook.iterations, vec![0]);
    assert_eq!(hook.ends, 1);
}

#[test]
fn step_reports_breakdown() {
    let a = CsrMatrix::from_raw_parts(1, vec![0, 0], vec![], vec![]).unwrap();
    let state = CgState::new(&a, &[1.0], vec![0.0]).unwrap();
    assert!(matches!(
        state.step(&a),
        Err(HeatError::NumericalBreakdown { iteration: 1, .. })
    ));
}

#[test]
fn hook_errors_abort_the_solve() {
    let a = laplacian_1d(4);
    let mut x = vec![0.0; 4];
    let err = solver(1e-8)
        .solve(&a, &[1.0; 4], &mut x, &mut FailingHook)
        .unwrap_err();
    assert!(matches!(err, HeatError::Io(_)));
}

#[test]
fn solve_rejects_mismatched_rhs() {
    let a = laplacian_1d(4);
    let mut x = vec![0.0; 4];
    assert!(solver(1e-5).solve(&a, &[1.0; 3], &mut x, &mut NoopHook).is_err());
}

// ─── Hook Cadence Tests ───────────────────────────────────────

#[test]
fn snapshots_every_interval_then_final() {
    let a = laplacian_2d(8);
    let n = a.dimension();
    let b: Vec<f64> = (0..n).map(|i| ((i * 7) % 5) as f64 - 2.0).collect();
    let mut x = vec![0.0; n];
    let mut hook = SnapshotRecorder::default();
    let cg = ConjugateGradient::new(SolverConfig {
        tolerance: 1e-8,
        max_iterations: Some(500),
        ..Default::default()
    })
    .unwrap();

    let report = cg.solve(&a, &b, &mut x, &mut hook).unwrap();
    assert!(report.converged);
    assert!(report.iterations > 10, "took {}", report.iterations);

    let snaps = &hook.iterations;
    assert!(snaps.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*snaps.last().unwrap(), report.iterations);
    for &k in &snaps[..snaps.len() - 1] {
        assert_eq!(k % 10, 0);
    }
    assert_eq!(snaps.len() - 1, (report.iterations - 1) / 10);
    assert_eq!(hook.last, x);
}

#[test]
fn telemetry_hook_sees_every_iteration() {
    let a = laplacian_2d(3);
    let b = vec![1.0; 9];
    let mut x = vec![0.0; 9];
    let mut hook = TelemetryHook::new();

    let report = solver(1e-10).solve(&a, &b, &mut x, &mut hook).unwrap();
    let events = hook.drain_events();

    let iterations = events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::Iteration { .. }))
        .count();
    assert_eq!(iterations, report.iterations);
    assert!(matches!(events[0].kind, EventKind::SolveBegin { dimension: 9, .. }));
    assert!(matches!(
        events.last().unwrap().kind,
        EventKind::Convergence { converged: true, .. }
    ));

    // Residuals reported to the hook shrink overall.
    let residuals: Vec<f64> = events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::Iteration { relative_residual } => Some(relative_residual),
            _ => None,
        })
        .collect();
    assert!(residuals.last().unwrap() < &1e-10);
}
