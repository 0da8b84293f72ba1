//! Integration tests for the `airmarshal` binary.
//!
//! Argument parsing, validation, and exit codes run without any server;
//! the end-to-end searches run against a wiremock Dashboard.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `airmarshal` binary with env isolation.
fn airmarshal_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("airmarshal");
    cmd.env_remove("MERAKI_DASHBOARD_API_KEY")
        .env_remove("MERAKI_DASHBOARD_BASE_URL")
        .env_remove("MERAKI_DASHBOARD_TIMEOUT")
        .env_remove("MERAKI_DASHBOARD_RETRY_ATTEMPTS")
        .env_remove("RUST_LOG");
    cmd
}

/// Point the binary at `server` with a test key.
fn mocked_cmd(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = airmarshal_cmd();
    cmd.env("MERAKI_DASHBOARD_API_KEY", "test-key")
        .args(["--base-url", &server.uri()]);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("X-Cisco-Meraki-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_dashboard(server: &MockServer) {
    mount_json(server, "/organizations", json!([{ "id": "549236", "name": "Acme" }])).await;
    mount_json(
        server,
        "/organizations/549236/networks",
        json!([
            { "id": "N_1", "name": "HQ-WiFi", "type": "wireless" },
            { "id": "N_2", "name": "HQ-MX", "type": "appliance" }
        ]),
    )
    .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = airmarshal_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    airmarshal_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Air Marshal")
            .and(predicate::str::contains("ssids"))
            .and(predicate::str::contains("apple-tvs")),
    );
}

#[test]
fn test_version_flag() {
    airmarshal_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("airmarshal"));
}

#[test]
fn test_completions_zsh() {
    airmarshal_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    airmarshal_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Validation before any request ───────────────────────────────────

#[test]
fn test_timespan_over_cap_fails_without_api_key() {
    airmarshal_cmd()
        .args(["ssids", "guest", "--timespan", "2678401"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Meraki Air Marshal API only allows timespan of <= 31 days",
        ));
}

#[test]
fn test_timespan_duration_over_cap() {
    airmarshal_cmd()
        .args(["apple-tvs", "-t", "32d"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("31 days"));
}

#[test]
fn test_unparsable_timespan_is_usage_error() {
    airmarshal_cmd()
        .args(["ssids", "guest", "-t", "soon"])
        .assert()
        .code(2);
}

#[test]
fn test_invalid_regex_is_usage_error() {
    airmarshal_cmd()
        .args(["ssids", "corp(guest"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid SSID pattern"));
}

#[test]
fn test_missing_api_key_is_auth_error() {
    airmarshal_cmd()
        .args(["ssids", "guest"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("MERAKI_DASHBOARD_API_KEY"));
}

// ── End to end ──────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_ssids_end_to_end_csv() {
    let server = MockServer::start().await;
    mount_dashboard(&server).await;
    Mock::given(method("GET"))
        .and(path("/networks/N_1/airMarshal"))
        .and(query_param("timespan", "604800"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ssid": "CorpGuest" },
            { "ssid": "evil-corpguest-clone" },
            { "ssid": "Printer-Direct" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/networks/N_2/airMarshal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    mocked_cmd(&server)
        .args(["ssids", "corpguest"])
        .assert()
        .success()
        .stdout("HQ-WiFi,CorpGuest\nHQ-WiFi,evil-corpguest-clone\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ssids_humantime_timespan_is_sent_in_seconds() {
    let server = MockServer::start().await;
    mount_dashboard(&server).await;
    Mock::given(method("GET"))
        .and(path("/networks/N_1/airMarshal"))
        .and(query_param("timespan", "86400"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "ssid": "Guest" }])))
        .expect(1)
        .mount(&server)
        .await;

    mocked_cmd(&server)
        .args(["ssids", "guest", "-t", "1d"])
        .assert()
        .success()
        .stdout("HQ-WiFi,Guest\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apple_tvs_end_to_end_json() {
    let server = MockServer::start().await;
    mount_dashboard(&server).await;
    mount_json(&server, "/networks/N_1/devices", json!([{ "serial": "Q2XX-AAAA-0001" }])).await;
    mount_json(
        &server,
        "/devices/Q2XX-AAAA-0001/clients",
        json!([
            { "mac": "5c:f9:38:aa:bb:cc", "ip": "10.0.0.20", "description": null, "dhcpHostname": "atv" },
            { "mac": "00:11:22:33:44:55", "ip": "10.0.0.21", "description": "Laptop", "dhcpHostname": "lt" }
        ]),
    )
    .await;

    let output = mocked_cmd(&server)
        .args(["apple-tvs", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rows,
        json!([{
            "network": "HQ-WiFi",
            "device": "unknown",
            "mac": "5c:f9:38:aa:bb:cc",
            "ip": "10.0.0.20",
            "description": "unknown",
            "dhcp_hostname": "atv",
            "reason": "mac-prefix"
        }])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_api_key_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    mocked_cmd(&server)
        .args(["ssids", "guest"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_organizations_failure_exits_with_general_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    mocked_cmd(&server)
        .args(["apple-tvs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Can't request organizations"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quiet_suppresses_report() {
    let server = MockServer::start().await;
    mount_dashboard(&server).await;
    mount_json(&server, "/networks/N_1/airMarshal", json!([{ "ssid": "Guest" }])).await;

    mocked_cmd(&server)
        .args(["ssids", "guest", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
