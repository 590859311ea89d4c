//! CLI tests for the `vidmode parse` subcommand.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;
use vidmode_diagnostics::codes;

fn vidmode_cmd() -> Command {
    Command::new(cargo::cargo_bin!("vidmode"))
}

fn parse_json(args: &[&str]) -> (std::process::Output, serde_json::Value) {
    let output = vidmode_cmd()
        .arg("parse")
        .args(args)
        .args(["--output", "json"])
        .output()
        .expect("run parse command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    (output, json)
}

#[test]
fn parse_resolution_json() {
    let (output, json) = parse_json(&["1920x1080@60i"]);
    assert!(output.status.success());
    assert_eq!(json["mode"], "1920x1080@60i");
    let desc = &json["descriptor"];
    assert_eq!(desc["specified"], true);
    assert_eq!(desc["xres"], 1920);
    assert_eq!(desc["yres"], 1080);
    assert_eq!(desc["refresh_specified"], true);
    assert_eq!(desc["refresh"], 60);
    assert_eq!(desc["interlace"], true);
    assert_eq!(desc["force"], "unspecified");
    assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn parse_named_mode_json() {
    let (output, json) = parse_json(&["NTSC-24"]);
    assert!(output.status.success());
    assert_eq!(json["descriptor"]["name"], "NTSC");
    assert_eq!(json["descriptor"]["bpp"], 24);
}

#[test]
fn parse_mode_starting_with_hyphen_is_a_value() {
    let (output, json) = parse_json(&["-24"]);
    assert!(!output.status.success());
    assert_eq!(json["diagnostics"][0]["id"], codes::UNKNOWN_NAMED_MODE);
}

#[test]
fn parse_error_json_has_span_and_context() {
    let (output, json) = parse_json(&["720x480f"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(json["descriptor"].is_null());
    let diag = &json["diagnostics"][0];
    assert_eq!(diag["id"], codes::UNKNOWN_FLAG);
    assert_eq!(diag["severity"], "error");
    assert_eq!(diag["span"]["start"], 7);
    assert_eq!(diag["span"]["end"], 8);
    assert_eq!(diag["context"]["flag"], "f");
}

#[test]
fn parse_empty_input_fails() {
    let (output, json) = parse_json(&[""]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(json["diagnostics"][0]["id"], codes::EMPTY_INPUT);
}

#[test]
fn parse_d_depends_on_connector() {
    let (_, hdmi) = parse_json(&["D", "--connector", "hdmi-a"]);
    assert_eq!(hdmi["descriptor"]["force"], "on_digital");

    let (_, vga) = parse_json(&["D", "--connector", "vga"]);
    assert_eq!(vga["descriptor"]["force"], "on");
}

#[test]
fn parse_connector_is_case_insensitive() {
    let (output, json) = parse_json(&["D", "--connector", "HDMI-B"]);
    assert!(output.status.success());
    assert_eq!(json["descriptor"]["force"], "on_digital");
}

#[test]
fn parse_unknown_connector_is_usage_error() {
    let output = vidmode_cmd()
        .args(["parse", "720x480", "--connector", "scart"])
        .output()
        .expect("run parse command");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("scart"), "stderr: {stderr}");
}

#[test]
fn parse_with_profile_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hdmi.jsonc");
    fs::write(
        &path,
        r#"{
            // main output
            "id": "desk-hdmi",
            "schema_version": "1.0.0",
            "connector_type": "hdmi-a",
        }"#,
    )
    .expect("write profile");
    let path = path.to_string_lossy().to_string();

    let (output, json) = parse_json(&["1024x768D", "--profile", &path]);
    assert!(output.status.success());
    assert_eq!(json["descriptor"]["force"], "on_digital");

    let (_, overridden) = parse_json(&["1024x768D", "--profile", &path, "--connector", "vga"]);
    assert_eq!(overridden["descriptor"]["force"], "on");
}

#[test]
fn parse_missing_profile_file_fails() {
    let output = vidmode_cmd()
        .args(["parse", "720x480", "--profile", "/nonexistent/profile.json"])
        .output()
        .expect("run parse command");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read profile"), "stderr: {stderr}");
}

#[test]
fn parse_invalid_profile_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"id": "", "schema_version": "1.0.0", "connector_type": "vga"}"#)
        .expect("write profile");

    let output = vidmode_cmd()
        .args(["parse", "720x480", "--profile"])
        .arg(&path)
        .output()
        .expect("run parse command");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid profile"), "stderr: {stderr}");
}

#[test]
fn parse_pretty_prints_descriptor_to_stdout() {
    let output = vidmode_cmd()
        .args(["parse", "720x480M", "--output", "pretty"])
        .output()
        .expect("run parse command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"cvt\": true"), "stdout: {stdout}");
}

#[test]
fn parse_pretty_error_renders_to_stderr() {
    let output = vidmode_cmd()
        .args(["parse", "720x480,rotate=42", "--output", "pretty"])
        .output()
        .expect("run parse command");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(codes::INVALID_ROTATION), "stderr: {stderr}");
    assert!(stderr.contains("1 error"), "stderr: {stderr}");
}

#[test]
fn verbose_logs_to_stderr() {
    let output = vidmode_cmd()
        .env_remove("RUST_LOG")
        .args(["parse", "720x480f", "--output", "json", "--verbose"])
        .output()
        .expect("run parse command");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DEBUG"), "stderr: {stderr}");
}
