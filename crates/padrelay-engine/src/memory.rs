//! In-memory transport and LED writer

use crate::ports::{INGEST_QUEUE_LEN, InboundReport, Transport};
use padrelay_device_types::AddressSlot;
use padrelay_hid_common::{ReportBuf, report_from_slice};
use padrelay_leds::{LedDomainId, LedWriter, TransportError};
use tracing::trace;

/// Transport backed by an ingest queue and send logs.
#[derive(Debug)]
pub struct MemoryTransport {
    inbound: heapless::spsc::Queue<InboundReport, INGEST_QUEUE_LEN>,
    host_ready: bool,
    host_error: Option<TransportError>,
    pub host_sent: Vec<ReportBuf>,
    pub peripheral_sent: Vec<(AddressSlot, ReportBuf)>,
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self {
            inbound: heapless::spsc::Queue::new(),
            host_ready: true,
            host_error: None,
            host_sent: Vec::new(),
            peripheral_sent: Vec::new(),
        }
    }

    /// Queues a report for the next poll; `Busy` when the queue is full.
    pub fn push(&mut self, report: InboundReport) -> Result<(), TransportError> {
        self.inbound
            .enqueue(report)
            .map_err(|_rejected| TransportError::Busy)
    }

    pub fn push_from_peripheral(&mut self, slot: AddressSlot, bytes: &[u8]) -> Result<(), TransportError> {
        let report = InboundReport::from_peripheral(slot, bytes).map_err(|_err| TransportError::Rejected)?;
        self.push(report)
    }

    pub fn push_from_host(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let report = InboundReport::from_host(bytes).map_err(|_err| TransportError::Rejected)?;
        self.push(report)
    }

    pub fn pending(&self) -> usize {
        self.inbound.len()
    }

    pub fn set_host_ready(&mut self, ready: bool) {
        self.host_ready = ready;
    }

    /// Makes every host send fail with `error` until cleared.
    pub fn fail_host_sends(&mut self, error: Option<TransportError>) {
        self.host_error = error;
    }

    pub fn last_host_report(&self) -> Option<&[u8]> {
        self.host_sent.last().map(|r| r.as_slice())
    }
}

impl Transport for MemoryTransport {
    fn poll_report(&mut self) -> Option<InboundReport> {
        self.inbound.dequeue()
    }

    fn host_ready(&self) -> bool {
        self.host_ready
    }

    fn send_to_host(&mut self, report: &[u8]) -> Result<(), TransportError> {
        if let Some(err) = self.host_error {
            return Err(err);
        }
        let buf = report_from_slice(report).map_err(|_err| TransportError::Rejected)?;
        trace!("host <- {:02X?}", report);
        self.host_sent.push(buf);
        Ok(())
    }

    fn send_to_peripheral(&mut self, slot: AddressSlot, report: &[u8]) -> Result<(), TransportError> {
        let buf = report_from_slice(report).map_err(|_err| TransportError::Rejected)?;
        trace!("{} <- {:02X?}", slot, report);
        self.peripheral_sent.push((slot, buf));
        Ok(())
    }
}

/// One recorded LED write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedWrite {
    pub domain: LedDomainId,
    pub address: u16,
    pub bytes: Vec<u8>,
}

/// LED writer that records every write.
#[derive(Debug, Default)]
pub struct MemoryLedWriter {
    pub writes: Vec<LedWrite>,
    fail_with: Option<TransportError>,
}

impl MemoryLedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every write fail with `error` until cleared.
    pub fn fail_writes(&mut self, error: Option<TransportError>) {
        self.fail_with = error;
    }
}

impl LedWriter for MemoryLedWriter {
    fn write(&mut self, domain: LedDomainId, address: u16, bytes: &[u8]) -> Result<(), TransportError> {
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        self.writes.push(LedWrite {
            domain,
            address,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}
