// ABOUTME: Integration tests for the redeploy CLI commands.
// ABOUTME: Validates --help output, init, and plan behaviour.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn redeploy_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("redeploy"))
}

const PLAN_CONFIG: &str = r#"service: my-api
server:
  host: api.example.com
  user: deploy
workdir: /srv/my-api
steps:
  - name: free service port
    command: fuser -k 5001/tcp
    allow_failure: true
  - name: update checkout
    command: git pull
"#;

#[test]
fn help_shows_commands() {
    redeploy_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("redeploy.yml");

    redeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "redeploy.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("steps:"), "Config should have steps");
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("redeploy.yml");

    fs::write(&config_path, "existing: config").unwrap();

    redeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_writes_requested_service_name() {
    let temp_dir = tempfile::tempdir().unwrap();

    redeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--service", "search-api"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("redeploy.yml")).unwrap();
    assert!(content.contains("service: search-api"));
}

#[test]
fn plan_prints_rendered_steps_without_connecting() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("redeploy.yml"), PLAN_CONFIG).unwrap();

    redeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("free service port (may fail)"))
        .stdout(predicate::str::contains("cd '/srv/my-api' && git pull"))
        .stdout(predicate::str::contains("2 step(s) planned"));
}

#[test]
fn plan_emits_json_lines() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("redeploy.yml"), PLAN_CONFIG).unwrap();

    let assert = redeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["plan", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let first: serde_json::Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(first["name"], "free service port");
    assert_eq!(first["allow_failure"], true);
}

#[test]
fn plan_fails_without_config() {
    let temp_dir = tempfile::tempdir().unwrap();

    redeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn run_fails_fast_when_credential_env_missing() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("redeploy.yml"),
        r#"service: my-api
server:
  host:
    env: REDEPLOY_CLI_TEST_HOST
steps:
  - name: update checkout
    command: git pull
"#,
    )
    .unwrap();

    // No connection attempt happens; config resolution fails first.
    redeploy_cmd()
        .current_dir(temp_dir.path())
        .env_remove("REDEPLOY_CLI_TEST_HOST")
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("REDEPLOY_CLI_TEST_HOST"));
}
