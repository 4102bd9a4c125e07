//! Integration tests for the `netaudit` CLI binary.
//!
//! These tests validate argument parsing, the offline audit flow, and
//! error handling — all without a live controller or device.
#![allow(clippy::unwrap_used)]

use std::io::Write as _;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `netaudit` binary with env isolation.
///
/// Clears all `NETAUDIT_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn netaudit_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("netaudit");
    cmd.env("HOME", "/tmp/netaudit-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/netaudit-cli-test-nonexistent")
        .env_remove("NETAUDIT_PROFILE")
        .env_remove("NETAUDIT_CONFIG")
        .env_remove("NETAUDIT_OUTPUT")
        .env_remove("NETAUDIT_INSECURE")
        .env_remove("NETAUDIT_TIMEOUT");
    cmd
}

fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const SOT_CSV: &str = "\
Device Name,Interface,Connected Device,Connected Interface,Purpose
sw01,Gi0/1,core01,Eth1/1,uplink
sw01,Gi0/2,core01,Eth1/2,backup uplink
sw99,Gi0/1,core01,Eth1/9,lab uplink
";

const NEIGHBORS_JSON: &str = r#"{
    "sw01": {
        "Gi0/1": {
            "ports": ["Eth1/1"],
            "hosts_by_port": {"Eth1/1": ["core01"]}
        }
    }
}"#;

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = netaudit_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Expected 'Usage':\n{stderr}");
}

#[test]
fn test_help_flag() {
    netaudit_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("inventory")
            .and(predicate::str::contains("audit"))
            .and(predicate::str::contains("topology")),
    );
}

#[test]
fn test_version_flag() {
    netaudit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("netaudit"));
}

// ── Audit flow (offline) ────────────────────────────────────────────

#[test]
fn test_audit_without_check_renders_links() {
    let sot = write_temp(SOT_CSV, ".csv");

    netaudit_cmd()
        .args(["audit", "--sot"])
        .arg(sot.path())
        .args(["-o", "csv"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Old Description")
                .and(predicate::str::contains("sw01,Gi0/1,core01,Eth1/1,uplink"))
                .and(predicate::str::contains("LLDP neighbor test").not()),
        );
}

#[test]
fn test_audit_with_check_classifies_links() {
    let sot = write_temp(SOT_CSV, ".csv");
    let neighbors = write_temp(NEIGHBORS_JSON, ".json");

    netaudit_cmd()
        .args(["audit", "--check", "--settle-delay", "0", "--sot"])
        .arg(sot.path())
        .arg("--neighbors")
        .arg(neighbors.path())
        .args(["-o", "csv"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("LLDP neighbor test")
                .and(predicate::str::contains("Correct"))
                .and(predicate::str::contains("Unknown - No LLDP neighbor info"))
                .and(predicate::str::contains("Unknown - LLDP is not enabled")),
        );
}

#[test]
fn test_audit_check_requires_neighbors() {
    let sot = write_temp(SOT_CSV, ".csv");

    let output = netaudit_cmd()
        .args(["audit", "--check", "--sot"])
        .arg(sot.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "usage error expected");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--neighbors"), "got:\n{stderr}");
}

#[test]
fn test_audit_missing_sot_file_is_input_error() {
    let output = netaudit_cmd()
        .args(["audit", "--sot", "/nonexistent/links.csv"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4), "input error expected");
}

#[test]
fn test_audit_writes_csv_report() {
    let sot = write_temp(SOT_CSV, ".csv");
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("audit.csv");

    netaudit_cmd()
        .args(["audit", "--sot"])
        .arg(sot.path())
        .arg("--out")
        .arg(&out_path)
        .assert()
        .success();

    let written = std::fs::read_to_string(&out_path).unwrap();
    assert!(written.starts_with("Device Name,Interface,"));
    assert!(written.contains("sw99,Gi0/1,core01,Eth1/9,lab uplink"));
}

// ── Inventory flow (offline) ────────────────────────────────────────

#[test]
fn test_inventory_from_capture_file() {
    let capture = write_temp(
        r#"[{
            "hostname": "lab-rtr01",
            "os": "ios",
            "show_version": {"type": "parsed", "output": {
                "version": {
                    "version": "15.2(CML",
                    "uptime": "1 hour, 59 minutes",
                    "chassis_sn": "99GVDCAYZ1T"
                }
            }},
            "show_inventory": {"type": "parsed", "output": {}}
        }]"#,
        ".json",
    );

    netaudit_cmd()
        .args(["inventory", "--facts"])
        .arg(capture.path())
        .args(["-o", "csv"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(
                "device_name,device_os,software_version,uptime,serial_number",
            )
            .and(predicate::str::contains("lab-rtr01,ios,15.2(CML")),
        );
}

#[test]
fn test_inventory_fabric_without_profile_fails() {
    let output = netaudit_cmd()
        .args(["inventory", "--fabric"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "usage error expected");
}
