//! Error types for padctl

use padrelay_engine::EngineError;
use padrelay_hid_console_protocol::ProtocolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Unknown console type: {0}")]
    UnknownConsole(String),

    #[error("Invalid hex input: {0}")]
    InvalidHex(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Scenario error: {0}")]
    ScenarioError(String),

    #[error("Protocol error: {0}")]
    ProtocolError(#[from] ProtocolError),

    #[error("Engine error: {0}")]
    EngineError(#[from] EngineError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::UnknownConsole(_) | CliError::InvalidHex(_) => 2,
            CliError::ValidationError(_)
            | CliError::ProtocolError(_)
            | CliError::YamlError(_)
            | CliError::JsonError(_) => 4,
            CliError::ScenarioError(_) | CliError::EngineError(_) => 5,
            CliError::IoError(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padrelay_device_types::ConsoleType;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::UnknownConsole("ps9".into()).exit_code(), 2);
        assert_eq!(
            CliError::from(ProtocolError::NoReportDescriptor(ConsoleType::Xbox360)).exit_code(),
            4
        );
        assert_eq!(
            CliError::from(EngineError::EventQueueFull { capacity: 16 }).exit_code(),
            5
        );
    }

    #[test]
    fn test_display_wraps_source() {
        let err = CliError::from(ProtocolError::InvalidButtonCount(0));
        assert_eq!(
            err.to_string(),
            "Protocol error: Button count 0 outside 1..=16"
        );
    }
}
