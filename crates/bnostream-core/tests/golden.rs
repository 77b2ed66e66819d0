use std::fs;
use std::path::Path;

use bnostream_core::{CaptureReport, decode_capture_file};

fn load_expected_report(dir: &str) -> CaptureReport {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let expected_path = root.join(dir).join("expected_report.json");

    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let input = root.join(dir).join("input.bin");
    let expected = load_expected_report(dir);

    let actual = decode_capture_file(&input).expect("decode capture");

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_clean() {
    run_golden("tests/golden/clean");
}

#[test]
fn golden_split_packets() {
    run_golden("tests/golden/split_packets");
}

#[test]
fn golden_clean_has_reference_packet_first() {
    let report = load_expected_report("tests/golden/clean");
    let first = &report.events[0];
    assert_eq!(first.acceleration.x, 1.0);
    assert_eq!(first.gyro.x, 0.5);
    assert_eq!(first.temperature, 2.5);
    assert_eq!(report.frames_dropped, 0);
}

#[test]
fn golden_split_packets_drops_fragments() {
    let report = load_expected_report("tests/golden/split_packets");
    assert_eq!(report.frames_total, 5);
    assert_eq!(report.frames_dropped, 3);
    assert_eq!(report.events.len(), 2);
    assert_eq!(report.events[1].orientation.heading(), 90.0);
}
