//! Port traits between the engine and the transport stack
//!
//! Every call is non-blocking. A poll with nothing to deliver returns
//! `None`; a send that cannot complete now returns
//! [`TransportError::Busy`] and the engine retries on a later tick.

use padrelay_device_types::AddressSlot;
use padrelay_hid_common::{HidCommonResult, ReportBuf, report_from_slice};
use padrelay_leds::TransportError;

/// Capacity of interrupt-fed ingest queues; one slot stays empty.
pub const INGEST_QUEUE_LEN: usize = 16;

/// Single-producer queue an interrupt handler fills and the tick drains.
pub type IngestQueue = heapless::spsc::Queue<InboundReport, INGEST_QUEUE_LEN>;
pub type IngestProducer<'a> = heapless::spsc::Producer<'a, InboundReport, INGEST_QUEUE_LEN>;
pub type IngestConsumer<'a> = heapless::spsc::Consumer<'a, InboundReport, INGEST_QUEUE_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSource {
    Peripheral(AddressSlot),
    /// Output, feature or handshake traffic from the console.
    Host,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundReport {
    pub source: ReportSource,
    pub bytes: ReportBuf,
}

impl InboundReport {
    pub fn from_peripheral(slot: AddressSlot, bytes: &[u8]) -> HidCommonResult<Self> {
        Ok(Self {
            source: ReportSource::Peripheral(slot),
            bytes: report_from_slice(bytes)?,
        })
    }

    pub fn from_host(bytes: &[u8]) -> HidCommonResult<Self> {
        Ok(Self {
            source: ReportSource::Host,
            bytes: report_from_slice(bytes)?,
        })
    }
}

/// USB device side toward the console plus USB host / Bluetooth side toward
/// peripherals.
pub trait Transport {
    /// Next inbound report, if any arrived.
    fn poll_report(&mut self) -> Option<InboundReport>;

    /// Whether the host endpoint can take another input report.
    fn host_ready(&self) -> bool;

    fn send_to_host(&mut self, report: &[u8]) -> Result<(), TransportError>;

    fn send_to_peripheral(&mut self, slot: AddressSlot, report: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn poll_report(&mut self) -> Option<InboundReport> {
        (**self).poll_report()
    }

    fn host_ready(&self) -> bool {
        (**self).host_ready()
    }

    fn send_to_host(&mut self, report: &[u8]) -> Result<(), TransportError> {
        (**self).send_to_host(report)
    }

    fn send_to_peripheral(&mut self, slot: AddressSlot, report: &[u8]) -> Result<(), TransportError> {
        (**self).send_to_peripheral(slot, report)
    }
}
