//! Hardware write port

use crate::LedDomainId;
use thiserror::Error;

/// Failure of a non-blocking transfer. The caller keeps the data pending and
/// tries again on a later tick.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    #[error("Transport busy")]
    Busy,

    #[error("Device disconnected")]
    Disconnected,

    #[error("Transfer rejected by device")]
    Rejected,
}

impl TransportError {
    /// Whether the same transfer can succeed later without any state change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Busy)
    }
}

/// Sink for packed LED bytes, one implementation per board bus.
pub trait LedWriter {
    /// Writes `bytes` to the LED group at `address` in `domain`.
    fn write(&mut self, domain: LedDomainId, address: u16, bytes: &[u8]) -> Result<(), TransportError>;
}

impl<W: LedWriter + ?Sized> LedWriter for &mut W {
    fn write(&mut self, domain: LedDomainId, address: u16, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write(domain, address, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_busy_is_retryable() {
        assert!(TransportError::Busy.is_retryable());
        assert!(!TransportError::Disconnected.is_retryable());
        assert!(!TransportError::Rejected.is_retryable());
    }
}
