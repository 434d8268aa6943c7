//! `agentspace-registrar config` end to end: resolution sources and keys.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn registrar(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentspace-registrar"));
    cmd.env_clear()
        .env("NO_COLOR", "1")
        .current_dir(dir.path());
    cmd
}

fn show_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = registrar(dir)
        .args(["config", "show"])
        .args(args)
        .args(["--json", "-y"])
        .output()
        .expect("run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json")
}

#[test]
fn test_show_applies_engine_location_default() {
    let dir = TempDir::new().expect("tempdir");
    let value = show_json(&dir, &["engine", "list", "--set", "project_id=p"]);
    assert_eq!(value["values"]["location"]["value"], "us-central1");
    assert_eq!(value["values"]["location"]["source"], "default");
    assert_eq!(value["values"]["project_id"]["source"], "cli");
}

#[test]
fn test_show_reports_each_source() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"project_id": "file-proj", "app_id": "file-app"}"#,
    )
    .expect("write");

    let output = registrar(&dir)
        .env("AGENTSPACE_APP_ID", "env-app")
        .env("AGENTSPACE_API_LOCATION", "eu")
        .args(["config", "show", "registry", "list", "--json", "-y"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");

    assert_eq!(value["values"]["project_id"]["source"], "config file");
    assert_eq!(value["values"]["app_id"]["value"], "file-app");
    assert_eq!(value["values"]["api_location"]["value"], "eu");
    assert_eq!(value["values"]["api_location"]["source"], "environment");
}

#[test]
fn test_show_masks_client_secret() {
    let dir = TempDir::new().expect("tempdir");
    let value = show_json(
        &dir,
        &[
            "auth",
            "create",
            "--set",
            "project_id=p",
            "--set",
            "oauth_client_id=cid",
            "--set",
            "oauth_client_secret=super-secret-value",
        ],
    );
    let shown = value["values"]["oauth_client_secret"]["value"]
        .as_str()
        .expect("string");
    assert!(!shown.contains("super-secret-value"), "got: {shown}");
    assert_eq!(value["values"]["scopes"]["value"], "email");
    assert_eq!(value["values"]["location"]["value"], "us");
}

#[test]
fn test_show_unsupported_action_exits_2() {
    let dir = TempDir::new().expect("tempdir");
    registrar(&dir)
        .args(["config", "show", "engine", "create", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn test_show_rejects_unknown_set_key() {
    let dir = TempDir::new().expect("tempdir");
    registrar(&dir)
        .args(["config", "show", "engine", "list", "--set", "colour=blue", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_keys_lists_prefixed_env_vars() {
    let dir = TempDir::new().expect("tempdir");
    registrar(&dir)
        .args(["config", "keys", "--env-prefix", "ACME"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project_id"))
        .stdout(predicate::str::contains("ACME_PROJECT_ID"))
        .stdout(predicate::str::contains("OAUTH_CLIENT_SECRET"));
}
