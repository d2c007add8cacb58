//! Common HID utilities for padrelay protocol implementations
//!
//! This crate provides the byte-level pieces shared by every console protocol:
//! tolerant report reading, fixed-capacity report writing and HID report
//! descriptor item assembly.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod descriptor;
pub mod report_reader;
pub mod report_writer;

pub use descriptor::*;
pub use report_reader::*;
pub use report_writer::*;

use thiserror::Error;

/// Largest report any supported console exchanges in one transfer.
pub const MAX_REPORT_LEN: usize = 64;

/// Largest report descriptor assembled by [`DescriptorBuilder`].
pub const MAX_DESCRIPTOR_LEN: usize = 256;

/// Raw report bytes exchanged with the transport.
pub type ReportBuf = heapless::Vec<u8, MAX_REPORT_LEN>;

/// Assembled HID report descriptor.
pub type DescriptorBuf = heapless::Vec<u8, MAX_DESCRIPTOR_LEN>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HidCommonError {
    #[error("Report overflow: {len} bytes exceeds capacity {capacity}")]
    ReportOverflow { len: usize, capacity: usize },

    #[error("Descriptor overflow: capacity {capacity} exceeded")]
    DescriptorOverflow { capacity: usize },

    #[error("Unbalanced collections in descriptor ({open} left open)")]
    UnbalancedCollection { open: i16 },

    #[error("Invalid report format: {0}")]
    InvalidReport(&'static str),
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;

/// Copies `bytes` into a [`ReportBuf`], rejecting oversized input.
pub fn report_from_slice(bytes: &[u8]) -> HidCommonResult<ReportBuf> {
    ReportBuf::from_slice(bytes).map_err(|()| HidCommonError::ReportOverflow {
        len: bytes.len(),
        capacity: MAX_REPORT_LEN,
    })
}
