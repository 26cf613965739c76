//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn stockhouse() -> Command {
    let mut cmd = Command::cargo_bin("stockhouse").unwrap();
    cmd.env_remove("DATABASE_URL")
        .env_remove("STOCKHOUSE_BIND_ADDR")
        .env_remove("RUST_LOG");
    cmd
}

// === Help Tests ===

#[test]
fn test_help_lists_commands() {
    stockhouse()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_serve_help() {
    stockhouse()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--max-connections"))
        .stdout(predicate::str::contains("Allow permissive CORS"));
}

#[test]
fn test_unknown_command_fails() {
    stockhouse().arg("frobnicate").assert().failure();
}

// === Config Command Tests ===

#[test]
fn test_config_path_under_home() {
    let home = tempfile::tempdir().unwrap();

    stockhouse()
        .env("HOME", home.path())
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains(".stockhouse"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_defaults() {
    let home = tempfile::tempdir().unwrap();

    stockhouse()
        .env("HOME", home.path())
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("bind_addr = \"127.0.0.1:3030\""))
        .stdout(predicate::str::contains("max_connections = 5"));
}

#[test]
fn test_config_show_reads_file_and_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockhouse.toml");
    std::fs::write(
        &path,
        "database_url = \"sqlite://from-file.db\"\nrequest_timeout_secs = 5\n",
    )
    .unwrap();

    stockhouse()
        .env("STOCKHOUSE_BIND_ADDR", "0.0.0.0:8088")
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite://from-file.db"))
        .stdout(predicate::str::contains("request_timeout_secs = 5"))
        .stdout(predicate::str::contains("0.0.0.0:8088"));
}

#[test]
fn test_config_show_rejects_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "bind_addr = [").unwrap();

    stockhouse()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml"));
}

// === Completions Test ===

#[test]
fn test_completions_bash() {
    stockhouse()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("stockhouse"));
}
