//! Sequential HID report writing into a fixed-capacity buffer

use crate::{HidCommonError, HidCommonResult, MAX_REPORT_LEN, ReportBuf};

/// Little-endian report writer.
///
/// Writes past the capacity are dropped and remembered; [`ReportWriter::finish`]
/// turns that into an error while [`ReportWriter::into_inner`] returns what fit.
#[derive(Debug, Clone, Default)]
pub struct ReportWriter {
    buffer: ReportBuf,
    overflowed: usize,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, byte: u8) {
        if self.buffer.push(byte).is_err() {
            self.overflowed = self.overflowed.saturating_add(1);
        }
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.push(value);
        self
    }

    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.push(value.to_le_bytes()[0]);
        self
    }

    pub fn write_u16_le(&mut self, value: u16) -> &mut Self {
        for b in value.to_le_bytes() {
            self.push(b);
        }
        self
    }

    pub fn write_i16_le(&mut self, value: i16) -> &mut Self {
        for b in value.to_le_bytes() {
            self.push(b);
        }
        self
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        for &b in data {
            self.push(b);
        }
        self
    }

    pub fn write_zeros(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.push(0);
        }
        self
    }

    /// Zero-pads up to `len` bytes; no-op when already that long.
    pub fn pad_to(&mut self, len: usize) -> &mut Self {
        let missing = len.saturating_sub(self.len());
        self.write_zeros(missing)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> ReportBuf {
        self.buffer
    }

    pub fn finish(self) -> HidCommonResult<ReportBuf> {
        if self.overflowed > 0 {
            return Err(HidCommonError::ReportOverflow {
                len: MAX_REPORT_LEN.saturating_add(self.overflowed),
                capacity: MAX_REPORT_LEN,
            });
        }
        Ok(self.buffer)
    }
}
