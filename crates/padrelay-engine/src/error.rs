//! Engine errors and their severity

use crate::events::EVENT_QUEUE_LEN;
use core::fmt;
use padrelay_device_types::AddressSlot;
use padrelay_leds::{LedDomainId, LedError, TransportError};
use padrelay_registry::RegistryError;
use thiserror::Error;

/// How serious an error is for the running engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Expected in normal operation.
    Info = 0,
    /// Something was dropped or deferred; the next tick retries.
    Warning = 1,
    /// An operation failed.
    Error = 2,
    /// The engine cannot run with this input.
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Rejections from [`EngineConfig::validate`](crate::EngineConfig::validate)
/// and [`Engine::init`](crate::Engine::init).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_reports_per_tick must be between 1 and {max}, got {value}")]
    ReportBudget { value: usize, max: usize },

    #[error("Binding {binding}: player LED {player} does not exist (0..=7)")]
    PlayerOutOfRange { binding: usize, player: u8 },

    #[error("Binding {binding}: keyboard LED {led} does not exist (0..=4)")]
    KeyboardLedOutOfRange { binding: usize, led: u8 },

    #[error("Binding {binding}: {domain} has {len} LEDs, index {index} is out of range")]
    BindingOutOfRange {
        binding: usize,
        domain: LedDomainId,
        index: usize,
        len: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Event queue full ({capacity} events pending)")]
    EventQueueFull { capacity: usize },

    #[error("Connection table full ({capacity} connections)")]
    ConnectionTableFull { capacity: usize },

    #[error("No connection at {0}")]
    UnknownSlot(AddressSlot),

    #[error("Connection at {0} is not authenticating")]
    NotAuthenticating(AddressSlot),

    #[error(transparent)]
    Led(#[from] LedError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl EngineError {
    pub(crate) fn queue_full() -> Self {
        EngineError::EventQueueFull {
            capacity: EVENT_QUEUE_LEN,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::Config(_) => ErrorSeverity::Critical,
            EngineError::EventQueueFull { .. } => ErrorSeverity::Warning,
            EngineError::ConnectionTableFull { .. } => ErrorSeverity::Error,
            EngineError::UnknownSlot(_) | EngineError::NotAuthenticating(_) => {
                ErrorSeverity::Warning
            }
            EngineError::Led(_) => ErrorSeverity::Error,
            EngineError::Registry(_) => ErrorSeverity::Info,
            EngineError::Transport(e) if e.is_retryable() => ErrorSeverity::Warning,
            EngineError::Transport(_) => ErrorSeverity::Error,
        }
    }

    /// Anything short of critical leaves the engine running.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
