//! Output formatting for padctl

use anyhow::Error;
use colored::*;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::CliError;
use crate::hex;

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::UnknownConsole(_)) => "unknown_console",
        Some(CliError::InvalidHex(_)) => "invalid_hex",
        Some(CliError::ValidationError(_)) => "validation",
        Some(CliError::ScenarioError(_)) => "scenario",
        Some(CliError::ProtocolError(_)) => "protocol",
        Some(CliError::EngineError(_)) => "engine",
        Some(CliError::IoError(_)) => "io",
        Some(CliError::JsonError(_)) => "json",
        Some(CliError::YamlError(_)) => "yaml",
        None => "internal",
    }
}

fn print_pretty(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    print_pretty(&json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    }));
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Wraps `payload` as `{"success": true, <key>: payload}`.
pub fn print_json<T: Serialize>(key: &str, payload: &T) -> Result<(), CliError> {
    let mut output = serde_json::Map::new();
    output.insert("success".to_string(), Value::Bool(true));
    output.insert(key.to_string(), serde_json::to_value(payload)?);
    print_pretty(&Value::Object(output));
    Ok(())
}

/// Report or descriptor bytes, sixteen per line.
pub fn print_bytes(label: &str, bytes: &[u8], json: bool) -> Result<(), CliError> {
    if json {
        return print_json(
            label,
            &json!({
                "len": bytes.len(),
                "hex": hex::format_bytes(bytes),
            }),
        );
    }

    println!("{} ({} bytes)", label.bold(), bytes.len());
    for (row, chunk) in bytes.chunks(16).enumerate() {
        println!("  {:04x}  {}", row * 16, hex::format_bytes(chunk));
    }
    Ok(())
}

pub fn print_field(name: &str, value: impl std::fmt::Display) {
    println!("  {:<18} {}", format!("{name}:").dimmed(), value);
}
