//! Integration tests for the lift binary.
//!
//! These tests verify end-to-end behavior including:
//! - Reading JSONL and CSV logs from the data directory or --input
//! - Text and JSON listings of groups
//! - Locating the group that starts with an exercise
//! - Tolerance of damaged log lines

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const WORKOUT: &str = r#"{"name":"Plank","duration":{"value":60,"unit":"s"}}
{"name":"Squat","weight":{"value":100,"unit":"kg"},"reps":5}
{"name":"Squat","weight":{"value":100,"unit":"kg"},"reps":5}
{"name":"Curl","weight":{"value":20,"unit":"kg"},"reps":10}
{"name":"Curl","weight":{"value":15,"unit":"kg"},"reps":10}
{"name":"Curl","weight":{"value":10,"unit":"kg"},"reps":10}
{"name":"Dip","reps":12}
{"name":"Row","weight":{"value":40,"unit":"kg"},"reps":10}
{"name":"Dip","reps":12}
{"name":"Row","weight":{"value":40,"unit":"kg"},"reps":10}
"#;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary, isolated from the user's config
fn cli(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lift"));
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_log(data_dir: &Path, contents: &str) {
    fs::create_dir_all(data_dir).unwrap();
    fs::write(data_dir.join("entries.jsonl"), contents).expect("Failed to write log");
}

fn json_groups(stdout: &[u8]) -> Vec<serde_json::Value> {
    serde_json::from_slice(stdout).expect("stdout is not a JSON array")
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("drop sets and supersets"));
}

#[test]
fn test_default_command_lists_groups() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_log(&data_dir, WORKOUT);

    cli(temp_dir.path())
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set: Plank ×1"))
        .stdout(predicate::str::contains("Set: Squat ×2"))
        .stdout(predicate::str::contains("Drop set: Curl ×3"))
        .stdout(predicate::str::contains("Superset (2 exercises): Dip ×4"));
}

#[test]
fn test_json_output() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_log(&data_dir, WORKOUT);

    let output = cli(temp_dir.path())
        .arg("group")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let groups = json_groups(&output);
    let kinds: Vec<_> = groups.iter().map(|g| g["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["set", "set", "drop_set", "superset"]);
    assert_eq!(groups[3]["cycle_length"], 2);
    assert_eq!(groups[3]["entries"].as_array().unwrap().len(), 4);

    // Every logged entry appears exactly once
    let total: usize = groups
        .iter()
        .map(|g| g["entries"].as_array().unwrap().len())
        .sum();
    assert_eq!(total, 10);
}

#[test]
fn test_config_sets_output_format() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_log(&data_dir, WORKOUT);

    let config_dir = temp_dir.path().join("config/lift");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[output]\nformat = \"json\"\n").unwrap();

    let output = cli(temp_dir.path())
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(json_groups(&output).len(), 4);
}

#[test]
fn test_csv_input() {
    let temp_dir = setup_test_dir();
    let csv_path = temp_dir.path().join("workout.csv");

    let csv = "\
name,weight,weight_unit,reps,distance,distance_unit,duration,duration_unit,rest,rest_unit,order
Press,50,kg,8,,,,,,,
Press,40,kg,8,,,,,90,s,
Press,30,kg,8,,,,,,,
";
    fs::write(&csv_path, csv).unwrap();

    // Rest after the second set ends the drop set there
    let output = cli(temp_dir.path())
        .arg("group")
        .arg("--input")
        .arg(&csv_path)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let groups = json_groups(&output);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["kind"], "drop_set");
    assert_eq!(groups[1]["kind"], "set");
}

#[test]
fn test_rest_demotes_drop_set() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_log(
        &data_dir,
        r#"{"name":"Curl","weight":{"value":50,"unit":"kg"},"reps":8,"rest":{"value":60,"unit":"s"}}
{"name":"Curl","weight":{"value":40,"unit":"kg"},"reps":8}
{"name":"Curl","weight":{"value":30,"unit":"kg"},"reps":8}
"#,
    );

    cli(temp_dir.path())
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set: Curl ×3"))
        .stdout(predicate::str::contains("Drop set").not());
}

#[test]
fn test_find_group() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_log(&data_dir, WORKOUT);

    cli(temp_dir.path())
        .arg("find")
        .arg("curl")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Drop set: Curl ×3"))
        .stdout(predicate::str::contains("Squat").not());
}

#[test]
fn test_find_unknown_exercise_fails() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_log(&data_dir, WORKOUT);

    cli(temp_dir.path())
        .arg("find")
        .arg("Lunge")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lunge"));
}

#[test]
fn test_damaged_log_lines_ignored() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_log(
        &data_dir,
        "{\"name\":\"Row\",\"reps\":10}\n{ invalid json }\n{\"name\":\"Row\",\"reps\":10}\n{\"name\":\"Ro",
    );

    cli(temp_dir.path())
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set: Row ×2"));
}

#[test]
fn test_empty_log() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_log(&data_dir, "");

    cli(temp_dir.path())
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries logged"));
}

#[test]
fn test_missing_log_fails() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("--data-dir")
        .arg(temp_dir.path().join("nowhere"))
        .assert()
        .failure();
}

#[test]
fn test_invalid_format_rejected() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("group")
        .arg("--format")
        .arg("yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown output format"));
}

#[test]
fn test_verbose_flag_enables_debug_logging() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_log(&data_dir, WORKOUT);

    cli(temp_dir.path())
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("-vv")
        .assert()
        .success()
        .stderr(predicate::str::contains("Grouped 3 entries starting at 3"));

    // Default level is warn: no per-group decisions on stderr
    cli(temp_dir.path())
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Grouped").not());
}
