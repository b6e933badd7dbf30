//! Integration tests for the `hrdesk` CLI binary.
//!
//! Argument parsing, offline commands and error exit codes, plus one
//! round trip against a mock backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `hrdesk` binary with env isolation.
///
/// Clears all `HRDESK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn hrdesk_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hrdesk");
    cmd.env("HOME", "/tmp/hrdesk-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/hrdesk-cli-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/hrdesk-cli-test-nonexistent")
        .env_remove("HRDESK_PROFILE")
        .env_remove("HRDESK_API_URL")
        .env_remove("HRDESK_ATTENDANCE_URL")
        .env_remove("HRDESK_TOKEN")
        .env_remove("HRDESK_COMPANY")
        .env_remove("HRDESK_OUTPUT")
        .env_remove("HRDESK_INSECURE")
        .env_remove("HRDESK_TIMEOUT")
        .env_remove("HRDESK_SESSION_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = hrdesk_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    hrdesk_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("HR/CRM")
            .and(predicate::str::contains("employees"))
            .and(predicate::str::contains("departments"))
            .and(predicate::str::contains("leads")),
    );
}

#[test]
fn test_version_flag() {
    hrdesk_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hrdesk"));
}

#[test]
fn test_completions_zsh() {
    hrdesk_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_subcommand() {
    let output = hrdesk_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("foobar"));
}

// ── Offline commands ────────────────────────────────────────────────

#[test]
fn test_salary_breakdown_json() {
    let output = hrdesk_cmd()
        .args(["salary", "600000", "20000", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["monthlyCtc"], json!(50000.0));
    assert_eq!(value["hra"], json!(8000.0));
    assert_eq!(value["employerPfContribution"], json!(2400.0));
    assert_eq!(value["allowances"], json!(19600.0));
}

#[test]
fn test_salary_without_pf() {
    let output = hrdesk_cmd()
        .args(["salary", "600000", "20000", "--no-pf", "-o", "json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["employeePfContribution"], json!(0.0));
    assert_eq!(value["allowances"], json!(22000.0));
}

#[test]
fn test_validate_reports_field_errors() {
    let dir = tempfile::tempdir().unwrap();
    let draft = dir.path().join("draft.json");
    std::fs::write(
        &draft,
        json!({
            "values": {
                "firstName": "Asha",
                "lastName": "Rao",
                "email": "asha@example.com",
                "phone": "12345"
            }
        })
        .to_string(),
    )
    .unwrap();

    let output = hrdesk_cmd().arg("validate").arg(&draft).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("phone: Phone number must be exactly 10 digits"), "{text}");
    assert!(text.contains("Personal"), "{text}");
}

#[test]
fn test_validate_rejects_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let draft = dir.path().join("draft.json");
    std::fs::write(&draft, r#"{"values": {"nickname": "Ash"}}"#).unwrap();

    let output = hrdesk_cmd().arg("validate").arg(&draft).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("nickname"));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_departments_list_without_config() {
    let output = hrdesk_cmd().args(["departments", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("config init"));
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_departments_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/departments/company/c1"))
        .and(header("authorization", "Bearer t0k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "departmentId": "d1", "name": "Engineering" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        hrdesk_cmd()
            .args(["departments", "list", "-o", "json-compact"])
            .args(["--api-url", &uri, "--token", "t0k", "--company", "c1"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["departmentId"], "d1");
    assert_eq!(value[0]["name"], "Engineering");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_conflict_maps_to_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/departments"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "message": "Department name already exists" })),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        hrdesk_cmd()
            .args(["departments", "create", "--name", "Engineering"])
            .args(["--api-url", &uri, "--token", "t0k", "--company", "c1"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(6));
    assert!(combined_output(&output).contains("Department name already exists"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreadable_session_file_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/departments/company/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    std::fs::write(&session, "not json").unwrap();
    let config_dir = dir.path().join("hrdesk");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "[profiles.default]\napi_url = '{}'\ncompany_id = 'c1'\nsession_file = '{}'\n",
            server.uri(),
            session.display()
        ),
    )
    .unwrap();

    let config_home = dir.path().to_path_buf();
    let output = tokio::task::spawn_blocking(move || {
        hrdesk_cmd()
            .env("XDG_CONFIG_HOME", &config_home)
            .args(["departments", "list", "-o", "json", "--token", "t0k"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ignoring unreadable session file"), "{stderr}");
}
