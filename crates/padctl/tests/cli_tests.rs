//! Integration tests for padctl
//!
//! Each test runs the built binary and checks its output and exit code.

use assert_cmd::Command;
use insta::assert_snapshot;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn is_json() -> impl predicates::Predicate<[u8]> {
    predicates::function::function(|s: &[u8]| {
        std::str::from_utf8(s)
            .map(|text| serde_json::from_str::<Value>(text).is_ok())
            .unwrap_or(false)
    })
}

fn padctl() -> Result<Command, Box<dyn std::error::Error>> {
    Ok(Command::cargo_bin("padctl")?)
}

fn scenario(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn json_output(cmd: &mut Command) -> Result<Value, Box<dyn std::error::Error>> {
    let output = cmd.output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_help_lists_commands() -> TestResult {
    padctl()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("simulate"));
    Ok(())
}

#[test]
fn test_classify_known_device_json() -> TestResult {
    let value = json_output(padctl()?.args(["--json", "classify", "054C", "05C4"]))?;
    assert_eq!(value["success"], true);
    assert_eq!(value["device"]["console_type"], "ps4");
    assert_eq!(value["device"]["sub_type"], "gamepad");
    assert_eq!(value["device"]["vendor_id"], 0x054C);
    Ok(())
}

#[test]
fn test_classify_unknown_device_is_universal() -> TestResult {
    let value = json_output(padctl()?.args(["classify", "0x1234", "0x5678", "--json"]))?;
    assert_eq!(value["device"]["classification"], "unknown");
    assert_eq!(value["device"]["console_type"], "universal");
    Ok(())
}

#[test]
fn test_classify_bad_id_exit_code() -> TestResult {
    padctl()?
        .args(["classify", "zz", "0268"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid hex input"));
    Ok(())
}

#[test]
fn test_encode_neutral_ps3_snapshot() -> TestResult {
    let value = json_output(padctl()?.args(["--json", "encode-neutral", "ps3"]))?;
    assert_eq!(value["report"]["len"], 27);
    assert_snapshot!(
        value["report"]["hex"].as_str().unwrap_or_default(),
        @"00 00 08 80 80 80 80 00 00 00 00 00 00 00 00 00 00 00 00 00 02 00 02 00 02 00 02"
    );
    Ok(())
}

#[test]
fn test_encode_neutral_xbox_one_has_guide_packet() -> TestResult {
    let value = json_output(padctl()?.args(["--json", "encode-neutral", "xbox-one"]))?;
    assert!(value["report"]["hex"].is_string());
    assert!(value["secondary"]["hex"].is_string());
    Ok(())
}

#[test]
fn test_descriptor_for_non_hid_family_fails() -> TestResult {
    padctl()?
        .args(["--json", "descriptor", "xbox360"])
        .assert()
        .failure()
        .code(4)
        .stdout(is_json())
        .stdout(predicate::str::contains("\"type\": \"protocol\""));
    Ok(())
}

#[test]
fn test_descriptor_button_count_validated() -> TestResult {
    padctl()?
        .args(["descriptor", "universal", "--buttons", "17"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Button count 17"));
    Ok(())
}

#[test]
fn test_descriptor_human_output() -> TestResult {
    padctl()?
        .args(["descriptor", "universal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0000  05 01 09 05"));
    Ok(())
}

#[test]
fn test_decode_ps3_button() -> TestResult {
    let report = "00 00 08 80 80 80 80 00 00 00 00 00 00 00 00 00 00 00 00 00 02 00 02 00 02 00 02";
    let pressed = format!("02{}", &report[2..]);

    let idle = json_output(padctl()?.args(["--json", "decode", "ps3", report]))?;
    let value = json_output(padctl()?.args(["--json", "decode", "ps3", &pressed]))?;
    assert_eq!(value["state"]["hat"], "neutral");
    assert_ne!(value["state"]["buttons"], idle["state"]["buttons"]);
    Ok(())
}

#[test]
fn test_simulate_ps4_authentication() -> TestResult {
    let value = json_output(
        padctl()?
            .arg("--json")
            .arg("simulate")
            .arg(scenario("ps4_auth.yaml")),
    )?;
    let sim = &value["simulation"];
    assert_eq!(sim["connections"][0]["phase"], "active");
    assert_eq!(sim["connections"][0]["console_type"], "ps4");
    assert_eq!(sim["peripheral_reports"][0]["bytes"], "f0 01 00 00 aa bb cc dd");
    let relayed = sim["host_reports"]
        .as_array()
        .ok_or("host_reports is not a list")?
        .iter()
        .any(|r| r == "f1 01 00 00 11 22 33 44");
    assert!(relayed, "response not relayed to host: {sim}");
    Ok(())
}

#[test]
fn test_simulate_led_feedback() -> TestResult {
    let value = json_output(
        padctl()?
            .arg("simulate")
            .arg(scenario("led_feedback.yaml"))
            .arg("--json"),
    )?;
    let sim = &value["simulation"];
    let writes = sim["led_writes"].as_array().ok_or("led_writes is not a list")?;

    // override, capacitive, lightbar, then 16 rebrightened onboard LEDs
    assert_eq!(writes.len(), 19);
    assert_eq!(writes[0]["domain"], "onboard");
    assert_eq!(writes[0]["address"], 1);
    assert_eq!(writes[0]["bytes"], "ff ff 00 00");
    assert_eq!(writes[1]["domain"], "capacitive");
    assert_eq!(writes[1]["bytes"], "08");
    assert_eq!(writes[2]["address"], 0);
    assert_eq!(writes[2]["bytes"], "ff 00 00 ff");
    assert_eq!(writes[3]["bytes"], "f0 00 00 ff");

    assert_eq!(sim["leds"][0]["index"], 1);
    assert_eq!(sim["leds"][0]["select"], true);
    Ok(())
}

#[test]
fn test_simulate_human_output() -> TestResult {
    padctl()?
        .arg("simulate")
        .arg(scenario("ps4_auth.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Connections"))
        .stdout(predicate::str::contains("usb:1.0 054C:05C4 ps4"));
    Ok(())
}

#[test]
fn test_simulate_invalid_scenario() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "steps:\n  - tick: 3\n")?;

    padctl()?
        .arg("--json")
        .arg("simulate")
        .arg(&path)
        .assert()
        .failure()
        .code(4)
        .stdout(is_json())
        .stdout(predicate::str::contains("\"type\": \"yaml\""));
    Ok(())
}

#[test]
fn test_simulate_config_rejected() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("budget.yaml");
    fs::write(&path, "config:\n  max_reports_per_tick: 0\n")?;

    padctl()?
        .arg("simulate")
        .arg(&path)
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("Engine error"));
    Ok(())
}

#[test]
fn test_simulate_missing_file() -> TestResult {
    padctl()?
        .args(["simulate", "does-not-exist.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("IO error"));
    Ok(())
}
