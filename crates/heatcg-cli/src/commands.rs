//! CLI command implementations.

use std::path::Path;

use tracing::info;

use heatcg_debug::hooks::{HookChain, TelemetryHook};
use heatcg_debug::snapshot::SnapshotHook;
use heatcg_io::contract::HeatParams;
use heatcg_io::setup::HeatSystem;
use heatcg_io::validator::validate_params;
use heatcg_solver::SolverConfig;
use heatcg_telemetry::sinks::{JsonLinesSink, TracingSink};
use heatcg_telemetry::EventBus;
use heatcg_types::HeatResult;

/// Assemble and solve the heat system, writing snapshots under `prefix`.
pub fn solve(
    input: &Path,
    prefix: &str,
    config_path: Option<&Path>,
    events_path: Option<&Path>,
) -> HeatResult<()> {
    let config = match config_path {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };

    let params = HeatParams::load(input)?;
    info!(input = %input.display(), ?params, "heat_input_loaded");
    let system = HeatSystem::assemble(&params)?;

    println!("heatcg solve");
    println!("────────────");
    println!("Input:      {}", input.display());
    println!("Grid:       {} x {} ({} unknowns)", system.nx, system.ny, system.unknowns());
    println!("Tolerance:  {:e}", config.tolerance);
    println!();

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));
    if let Some(path) = events_path {
        bus.add_sink(Box::new(JsonLinesSink::create(path)?));
    }

    let mut snapshots = SnapshotHook::new(prefix, system.layout.clone());
    let mut telemetry = TelemetryHook::with_bus(bus);
    let (_, report) = {
        let mut chain = HookChain::new();
        chain.push(&mut snapshots);
        chain.push(&mut telemetry);
        system.solve(&config, &mut chain)?
    };

    println!("Snapshots:  {}", snapshots.written().len());
    if let Some(last) = snapshots.written().last() {
        println!("Final:      {}", last.display());
    }
    if let Some(path) = events_path {
        println!("Events:     {}", path.display());
    }

    let report = report.into_result()?;
    println!("SUCCESS: CG solver converged in {} iterations.", report.iterations);
    Ok(())
}

/// Validate a heat input file, or a solver config when the file is TOML
/// and not a heat input.
pub fn validate(path: &Path) -> HeatResult<()> {
    println!("heatcg validate");
    println!("───────────────");
    println!("File: {}", path.display());
    println!();

    match HeatParams::load(path) {
        Ok(params) => {
            validate_params(&params)?;
            println!("Heat input: OK");
            println!("  L = {}, W = {}, h = {}", params.length, params.width, params.spacing);
            println!("  Tc = {}, Th = {}", params.cold_temperature, params.hot_temperature);
            println!("  Grid: {} x {}", params.nx(), params.ny());
        }
        Err(input_err) => {
            let is_toml = path.extension().is_some_and(|ext| ext == "toml");
            if !is_toml {
                return Err(input_err);
            }
            let config = SolverConfig::load(path).map_err(|_| input_err)?;
            println!("Solver config: OK");
            println!("  tolerance = {:e}", config.tolerance);
            println!("  snapshot_interval = {}", config.snapshot_interval);
            match config.max_iterations {
                Some(max) => println!("  max_iterations = {max}"),
                None => println!("  max_iterations = unknowns"),
            }
            println!("  initial_guess = {}", config.initial_guess);
        }
    }

    Ok(())
}
