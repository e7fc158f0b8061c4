//! Integration tests for the heatcg CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn heatcg() -> Command {
    let mut cmd = Command::cargo_bin("heatcg").unwrap();
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_cli_version() {
    heatcg()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("heatcg"));
}

#[test]
fn test_solve_small_plate() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "1 1 0.5 0 100\n").unwrap();
    let prefix = dir.path().join("sol");

    heatcg()
        .arg("solve")
        .arg(&input)
        .arg(&prefix)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SUCCESS: CG solver converged in 1 iterations.",
        ));

    assert!(dir.path().join("sol001.txt").exists());
}

#[test]
fn test_solve_writes_event_log() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "1 1 0.5 0 100\n").unwrap();
    let prefix = dir.path().join("sol");
    let events = dir.path().join("events.jsonl");

    heatcg()
        .arg("solve")
        .arg(&input)
        .arg(&prefix)
        .arg("--events")
        .arg(&events)
        .assert()
        .success();

    let log = fs::read_to_string(&events).unwrap();
    assert!(log.lines().count() >= 3);
    assert!(log.lines().last().unwrap().contains("Convergence"));
}

#[test]
fn test_iteration_cap_exits_with_two() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "1 1 0.125 20 100\n").unwrap();
    let config = dir.path().join("solver.toml");
    fs::write(&config, "tolerance = 1e-10\nmax_iterations = 1\n").unwrap();
    let prefix = dir.path().join("sol");

    heatcg()
        .arg("solve")
        .arg(&input)
        .arg(&prefix)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("did not converge"));

    assert!(dir.path().join("sol001.txt").exists());
}

#[test]
fn test_bad_input_exits_with_one() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "1 1 zero 0 100\n").unwrap();
    let prefix = dir.path().join("sol");

    heatcg()
        .arg("solve")
        .arg(&input)
        .arg(&prefix)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_validate_input_and_config() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "1 1 0.5 0 100\n").unwrap();
    let config = dir.path().join("solver.toml");
    fs::write(&config, "tolerance = 1e-8\nsnapshot_interval = 5\n").unwrap();

    heatcg()
        .arg("validate")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Heat input: OK"));
    heatcg()
        .arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Solver config: OK"));

    fs::write(&input, "1 0.5 0.5 0 100\n").unwrap();
    heatcg().arg("validate").arg(&input).assert().code(1);
}
