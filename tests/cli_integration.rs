//! CLI integration tests for munkres
//!
//! These tests drive the binary end to end over problem files written to a
//! temporary directory.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance for the munkres binary
fn munkres_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("munkres"));
    cmd.env_remove("MUNKRES_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Write a problem file into a fresh temp directory
fn write_problem(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

const DEMO_JSON: &str = r#"{
  "costs": [
    [19, 24, 29, 25],
    [17, 27, 30, 29],
    [19, 28, 31, 28],
    [20, 12, 28, 29],
    [20, 25, 31, 26]
  ],
  "agents": ["A", "B", "C", "D", "E"]
}"#;

// =============================================================================
// Solve
// =============================================================================

#[test]
fn test_solve_prints_assignments_and_total() {
    let (dir, path) = write_problem("costs.json", DEMO_JSON);

    munkres_cmd()
        .current_dir(dir.path())
        .arg("solve")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total cost: 84"))
        .stdout(predicate::str::contains("D -> Task 2"))
        .stdout(predicate::str::contains("(idle)"));
}

#[test]
fn test_solve_json_output() {
    let (dir, path) = write_problem("costs.json", DEMO_JSON);

    let output = munkres_cmd()
        .current_dir(dir.path())
        .args(["solve", path.to_str().unwrap(), "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["totalCost"], 84.0);
    assert_eq!(json["assignments"].as_array().unwrap().len(), 4);
    assert_eq!(json["starredPairs"].as_array().unwrap().len(), 5);
    assert_eq!(json["steps"][0]["title"], "Pad to square");
}

#[test]
fn test_solve_no_steps_omits_trace() {
    let (dir, path) = write_problem("costs.json", "[[1, 2], [2, 1]]");

    let output = munkres_cmd()
        .current_dir(dir.path())
        .args(["solve", path.to_str().unwrap(), "--format", "json", "--no-steps"])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.get_output().stdout)).unwrap();
    assert_eq!(json["totalCost"], 2.0);
    assert!(json["steps"].as_array().unwrap().is_empty());
}

#[test]
fn test_solve_reads_stdin() {
    munkres_cmd()
        .args(["solve", "-"])
        .write_stdin("[[4, 1, 3], [2, 0, 5], [3, 2, 2]]")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total cost: 5"))
        .stdout(predicate::str::contains("Agent 1 -> Task 2"));
}

#[test]
fn test_solve_yaml_and_toml() {
    let (dir, yaml) = write_problem("p.yaml", "costs:\n  - [3, 1]\n  - [1, 3]\ntasks: [left, right]\n");
    let toml = dir.path().join("p.toml");
    fs::write(&toml, "costs = [[3.0, 1.0], [1.0, 3.0]]\n").unwrap();

    munkres_cmd()
        .current_dir(dir.path())
        .arg("solve")
        .arg(&yaml)
        .assert()
        .success()
        .stdout(predicate::str::contains("Agent 1 -> right"))
        .stdout(predicate::str::contains("Total cost: 2"));

    munkres_cmd()
        .current_dir(dir.path())
        .arg("solve")
        .arg(&toml)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total cost: 2"));
}

#[test]
fn test_solve_wide_matrix_lists_unassigned_tasks() {
    let (dir, path) = write_problem("wide.json", r#"{"costs": [[5, 1, 9]], "tasks": ["x", "y", "z"]}"#);

    munkres_cmd()
        .current_dir(dir.path())
        .arg("solve")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Agent 1 -> y"))
        .stdout(predicate::str::contains("Unassigned tasks: x, z"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_negative_cost_rejected() {
    let (dir, path) = write_problem("bad.json", "[[1, -2], [3, 4]]");

    munkres_cmd()
        .current_dir(dir.path())
        .arg("solve")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("negative"));
}

#[test]
fn test_jagged_matrix_rejected() {
    let (dir, path) = write_problem("bad.json", "[[1, 2], [3]]");

    munkres_cmd()
        .current_dir(dir.path())
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Row 1 has 1 entries, expected 2"));
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    munkres_cmd()
        .current_dir(dir.path())
        .args(["solve", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn test_unsupported_extension_fails() {
    let (dir, path) = write_problem("costs.csv", "1,2\n3,4\n");

    munkres_cmd()
        .current_dir(dir.path())
        .arg("solve")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported problem format"));
}

// =============================================================================
// Trace and check
// =============================================================================

#[test]
fn test_trace_prints_every_step() {
    let (dir, path) = write_problem("costs.json", DEMO_JSON);

    munkres_cmd()
        .current_dir(dir.path())
        .arg("trace")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1/"))
        .stdout(predicate::str::contains("Pad to square"))
        .stdout(predicate::str::contains("Padded to 5×5 by adding 0 row(s) and 1 column(s) of zeros."))
        .stdout(predicate::str::contains("Final assignments"))
        .stdout(predicate::str::contains("Dummy"));
}

#[test]
fn test_trace_single_step_json() {
    let (dir, path) = write_problem("costs.json", DEMO_JSON);

    let output = munkres_cmd()
        .current_dir(dir.path())
        .args(["trace", path.to_str().unwrap(), "--step", "4", "--format", "json"])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.get_output().stdout)).unwrap();
    let steps = json.as_array().unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0]["title"], "Initial starring");
    assert!(steps[0]["starred"].is_array());
}

#[test]
fn test_trace_step_out_of_range() {
    let (dir, path) = write_problem("costs.json", "[[1]]");

    munkres_cmd()
        .current_dir(dir.path())
        .args(["trace", path.to_str().unwrap(), "--step", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_check_reports_padding() {
    let (dir, path) = write_problem("costs.json", DEMO_JSON);

    munkres_cmd()
        .current_dir(dir.path())
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid 5x4 cost matrix"))
        .stdout(predicate::str::contains("0 dummy row(s) and 1 dummy column(s)"));
}

// =============================================================================
// Demo and configuration
// =============================================================================

#[test]
fn test_demo_matches_reference_problem() {
    munkres_cmd()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("D -> Task 2"))
        .stdout(predicate::str::contains("Total cost: 84"));
}

#[test]
fn test_project_config_changes_labels_and_currency() {
    let (dir, path) = write_problem("costs.json", "[[1, 2], [2, 1], [5, 5]]");
    fs::write(
        dir.path().join(".munkres.toml"),
        "[labels]\nagent_prefix = \"Worker \"\nidle = \"(bench)\"\n\n[display]\ncurrency = \"$\"\n",
    )
    .unwrap();

    munkres_cmd()
        .current_dir(dir.path())
        .arg("solve")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Worker 3 -> (bench)"))
        .stdout(predicate::str::contains("Total cost: $2"));
}

#[test]
fn test_config_flag_sets_default_format() {
    let (dir, path) = write_problem("costs.json", "[[1, 2], [2, 1]]");
    let config = dir.path().join("custom.toml");
    fs::write(&config, "default_format = \"json\"\n").unwrap();

    let output = munkres_cmd()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("solve")
        .arg(&path)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.get_output().stdout)).unwrap();
    assert_eq!(json["totalCost"], 2.0);
}

#[test]
fn test_verbose_logs_to_stderr() {
    munkres_cmd()
        .args(["--verbose", "demo"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:solve]"));
}
