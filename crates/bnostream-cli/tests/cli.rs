use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bnostream"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_capture(name: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(name)
        .join("input.bin")
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("stream").and(contains("ports")).and(contains("decode")));
    for sub in ["stream", "ports", "decode"] {
        cmd().arg(sub).arg("--help").assert().success();
    }
}

#[test]
fn version_includes_build_info() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn decode_missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");

    cmd()
        .arg("decode")
        .arg(missing)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn decode_prints_event_blocks() {
    cmd()
        .arg("decode")
        .arg(golden_capture("clean"))
        .assert()
        .success()
        .stdout(
            contains("acceleration=(1.00, 0.00, 0.00)")
                .and(contains("gyro=(0.50, 0.00, 0.00)"))
                .and(contains("orientation=(roll=0.00, pitch=0.00, heading=0.00)"))
                .and(contains("temperature=2.50")),
        )
        .stderr(contains("decoded 3 events from 3 frames (0 dropped)"));
}

#[test]
fn decode_json_reports_dropped_frames() {
    let assert = cmd()
        .arg("decode")
        .arg(golden_capture("split_packets"))
        .arg("--json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(value["frames_total"], 5);
    assert_eq!(value["frames_dropped"], 3);
    assert_eq!(value["events"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["events"][1]["orientation"]["heading"], 90.0);
}

#[test]
fn pretty_requires_json() {
    cmd()
        .arg("decode")
        .arg(golden_capture("clean"))
        .arg("--pretty")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn quiet_suppresses_summary() {
    cmd()
        .arg("decode")
        .arg(golden_capture("clean"))
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("decoded").not());
}

#[test]
fn stream_on_missing_port_fails_with_hint() {
    let temp = TempDir::new().expect("tempdir");
    let port = temp.path().join("ttyMISSING");

    cmd()
        .arg("stream")
        .arg("--port")
        .arg(port)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("port open")).and(contains("hint:")));
}

#[test]
fn invalid_vendor_id_is_rejected() {
    cmd()
        .arg("stream")
        .arg("--vid")
        .arg("not-hex")
        .assert()
        .failure()
        .stderr(contains("invalid hex id"));
}
