//! CLI tests for the `vidmode list` subcommand.

use std::process::Command;

use assert_cmd::cargo;

fn vidmode_cmd() -> Command {
    Command::new(cargo::cargo_bin!("vidmode"))
}

fn list(what: &str, output: &str) -> String {
    let out = vidmode_cmd()
        .args(["list", what, "--output", output])
        .output()
        .expect("run list command");
    assert!(out.status.success(), "list {what} failed");
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn named_modes_pretty() {
    let stdout = list("named-modes", "pretty");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "{stdout}");
    assert!(lines[0].starts_with("NTSC "), "{stdout}");
    assert!(lines[0].ends_with("720x480i@60"), "{stdout}");
    assert!(stdout.contains("PAL_M"), "{stdout}");
}

#[test]
fn named_modes_json() {
    let json: serde_json::Value =
        serde_json::from_str(&list("named-modes", "json")).expect("valid json");
    let modes = json.as_array().expect("array");
    assert_eq!(modes.len(), 4);
    assert_eq!(modes[0]["name"], "NTSC");
    assert_eq!(modes[0]["tv_norm"], "NTSC-M");
    assert_eq!(modes[0]["timing"]["hdisplay"], 720);
}

#[test]
fn tv_modes_lists_all_norms() {
    let stdout = list("tv-modes", "pretty");
    assert_eq!(stdout.lines().count(), 25);
    assert!(stdout.lines().any(|l| l == "SECAM-K1"), "{stdout}");

    let json: serde_json::Value =
        serde_json::from_str(&list("tv-modes", "json")).expect("valid json");
    assert_eq!(json.as_array().map(Vec::len), Some(25));
    assert_eq!(json[0], "NTSC-443");
}

#[test]
fn connectors_are_classified() {
    let json: serde_json::Value =
        serde_json::from_str(&list("connectors", "json")).expect("valid json");
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 21);
    let hdmi = rows
        .iter()
        .find(|r| r["name"] == "hdmi-a")
        .expect("hdmi-a listed");
    assert_eq!(hdmi["digital"], true);
    assert_eq!(hdmi["tv"], false);

    let stdout = list("connectors", "pretty");
    assert!(stdout.lines().any(|l| l == "svideo (tv)"), "{stdout}");
    assert!(stdout.lines().any(|l| l == "dvi-d (digital)"), "{stdout}");
}

#[test]
fn unknown_list_kind_is_usage_error() {
    let out = vidmode_cmd()
        .args(["list", "encoders"])
        .output()
        .expect("run list command");
    assert_eq!(out.status.code(), Some(2));
}
