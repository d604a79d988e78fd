//! Testes de integração para a CLI do recache.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn recache_bin() -> Command {
    Command::cargo_bin("recache").expect("binary exists")
}

fn write_script(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("ops.txt");
    fs::write(&path, content).expect("Failed to write script");
    path
}

#[test]
fn test_version_command() {
    recache_bin()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("recache"));
}

#[test]
fn test_help_command() {
    recache_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("replay"));
}

#[test]
fn test_invalid_command() {
    recache_bin()
        .arg("invalid-command-that-does-not-exist")
        .assert()
        .failure();
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("recache.toml");

    recache_bin()
        .arg("init")
        .arg("--path")
        .arg(temp_dir.path())
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("Failed to read config");
    assert!(content.contains("[general]"));
    assert!(content.contains("[cache]"));
    assert!(content.contains("max_items = 1000"));
}

#[test]
fn test_check_rejects_zero_capacity() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("recache.toml");
    fs::write(&config_path, "[cache]\nmax_items = 0\n").unwrap();

    recache_bin()
        .arg("--config")
        .arg(&config_path)
        .arg("check")
        .assert()
        .failure();
}

#[test]
fn test_check_accepts_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("recache.toml");
    fs::write(&config_path, "[cache]\nmax_items = 25\n").unwrap();

    recache_bin()
        .arg("--config")
        .arg(&config_path)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_items: 25"));
}

#[test]
fn test_replay_reports_eviction() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let script = write_script(
        &temp_dir,
        "set k1 v1\nset k2 v2\nset k3 v3\nget k1\nget k2\nset k4 v4\nget k3\ncount\n",
    );

    recache_bin()
        .arg("--config")
        .arg(temp_dir.path().join("missing.toml"))
        .arg("replay")
        .arg(&script)
        .arg("--max-items")
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("set k4 v4 -> stored (evicted k3)"))
        .stdout(predicate::str::contains("get k3 -> miss"))
        .stdout(predicate::str::contains("count -> count 3"));
}

#[test]
fn test_replay_json_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let script = write_script(&temp_dir, "set a 1\nget \"\"\n");

    let output = recache_bin()
        .arg("--config")
        .arg(temp_dir.path().join("missing.toml"))
        .arg("replay")
        .arg(&script)
        .arg("--json")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid JSON line"))
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["kind"], "stored");
    assert_eq!(lines[1]["kind"], "rejected");
}

#[test]
fn test_replay_from_stdin() {
    recache_bin()
        .arg("--config")
        .arg("definitely-missing-recache.toml")
        .arg("replay")
        .arg("-")
        .write_stdin("set a 1\nthreshold\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold 1000"));
}

#[test]
fn test_replay_rejects_invalid_capacity() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let script = write_script(&temp_dir, "get a\n");

    recache_bin()
        .arg("--config")
        .arg(temp_dir.path().join("missing.toml"))
        .arg("replay")
        .arg(&script)
        .arg("--max-items")
        .arg("-2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidConfiguration"));
}

#[test]
fn test_replay_syntax_error_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let script = write_script(&temp_dir, "get a\nexplode\n");

    recache_bin()
        .arg("--config")
        .arg(temp_dir.path().join("missing.toml"))
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line: 2"));
}

#[test]
fn test_quiet_flag() {
    recache_bin().arg("-q").arg("version").assert().success();
}
