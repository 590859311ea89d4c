//! CLI tests for the `vidmode format` subcommand.

use std::process::Command;

use assert_cmd::cargo;
use vidmode_diagnostics::codes;

fn vidmode_cmd() -> Command {
    Command::new(cargo::cargo_bin!("vidmode"))
}

fn format_pretty(mode: &str, extra: &[&str]) -> std::process::Output {
    vidmode_cmd()
        .args(["format", mode, "--output", "pretty"])
        .args(extra)
        .output()
        .expect("run format command")
}

#[test]
fn canonical_mode_is_unchanged() {
    let output = format_pretty("720x480-24@60ime", &[]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "720x480-24@60ime\n");
}

#[test]
fn options_are_normalised() {
    let output = format_pretty("720x480,reflect_y,rotate=90,panel_orientation=left_side_up", &[]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "720x480,rotate=90,reflect_y,panel_orientation=left_up\n"
    );
}

#[test]
fn digital_force_follows_connector() {
    let output = format_pretty("1024x768D", &["--connector", "dvi-d"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1024x768D\n");

    let output = format_pretty("1024x768D", &["--connector", "composite"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1024x768e\n");
}

#[test]
fn format_json_envelope() {
    let output = vidmode_cmd()
        .args(["format", "margin_top=1,margin_left=2", "--output", "json"])
        .output()
        .expect("run format command");
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("valid json");
    assert_eq!(json["formatted"], "margin_left=2,margin_top=1");
    assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn format_rejects_invalid_mode() {
    let output = vidmode_cmd()
        .args(["format", "720x480,", "--output", "json"])
        .output()
        .expect("run format command");
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("valid json");
    assert!(json["formatted"].is_null());
    assert_eq!(json["diagnostics"][0]["id"], codes::EMPTY_OPTION);
}

#[test]
fn all_default_mode_formats_to_parseable_text() {
    let output = format_pretty("margin_left=0,margin_top=0", &[]);
    assert!(output.status.success());
    let formatted = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
    assert_eq!(formatted, "margin_left=0");

    let again = format_pretty(&formatted, &[]);
    assert!(again.status.success());
    assert_eq!(String::from_utf8_lossy(&again.stdout), "margin_left=0\n");
}
