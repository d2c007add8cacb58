//! Truncation-tolerant HID report reading
//!
//! Short reads are routine on USB interrupt endpoints, so every accessor takes
//! the neutral value to use when the field lies beyond the received bytes.
//! A multi-byte field is only read when all of its bytes are present.

/// Offset-based view over a raw report.
#[derive(Debug, Clone, Copy)]
pub struct ReportReader<'a> {
    data: &'a [u8],
}

impl<'a> ReportReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when the report is shorter than `expected`.
    pub fn is_truncated(&self, expected: usize) -> bool {
        self.data.len() < expected
    }

    pub fn slice(&self) -> &'a [u8] {
        self.data
    }

    pub fn u8_at(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    pub fn u8_or(&self, offset: usize, neutral: u8) -> u8 {
        self.u8_at(offset).unwrap_or(neutral)
    }

    pub fn i8_or(&self, offset: usize, neutral: i8) -> i8 {
        self.u8_at(offset)
            .map_or(neutral, |b| i8::from_le_bytes([b]))
    }

    pub fn u16_le_at(&self, offset: usize) -> Option<u16> {
        let end = offset.checked_add(2)?;
        let bytes = self.data.get(offset..end)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn u16_le_or(&self, offset: usize, neutral: u16) -> u16 {
        self.u16_le_at(offset).unwrap_or(neutral)
    }

    pub fn i16_le_or(&self, offset: usize, neutral: i16) -> i16 {
        self.u16_le_at(offset)
            .map_or(neutral, |v| i16::from_le_bytes(v.to_le_bytes()))
    }

    /// Reads one bit; a missing byte reads as released.
    pub fn bit(&self, offset: usize, bit: u8) -> bool {
        self.u8_at(offset)
            .is_some_and(|b| bit < 8 && b & (1 << bit) != 0)
    }

    /// Low nibble of the byte at `offset`.
    pub fn low_nibble_or(&self, offset: usize, neutral: u8) -> u8 {
        self.u8_at(offset).map_or(neutral, |b| b & 0x0F)
    }

    /// Copies `out.len()` bytes starting at `offset`, filling any missing
    /// tail with `neutral`.
    pub fn copy_or(&self, offset: usize, out: &mut [u8], neutral: u8) {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = offset
                .checked_add(i)
                .and_then(|at| self.u8_at(at))
                .unwrap_or(neutral);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_within_bounds() {
        let data = [0x01, 0x34, 0x12, 0xFF];
        let r = ReportReader::new(&data);

        assert_eq!(r.u8_or(0, 9), 0x01);
        assert_eq!(r.u16_le_or(1, 0), 0x1234);
        assert_eq!(r.i16_le_or(2, 0), i16::from_le_bytes([0x12, 0xFF]));
        assert_eq!(r.i8_or(3, 0), -1);
        assert!(r.bit(0, 0));
        assert!(!r.bit(0, 1));
    }

    #[test]
    fn test_truncated_fields_use_neutral() {
        let data = [0x80, 0x05];
        let r = ReportReader::new(&data);

        assert_eq!(r.u8_or(2, 0x80), 0x80);
        // only one byte of the u16 is present
        assert_eq!(r.u16_le_or(1, 0x0200), 0x0200);
        assert!(!r.bit(5, 3));
        assert_eq!(r.low_nibble_or(7, 0x08), 0x08);
        assert!(r.is_truncated(3));
        assert!(!r.is_truncated(2));
    }

    #[test]
    fn test_copy_or_pads_tail() {
        let data = [1, 2, 3];
        let r = ReportReader::new(&data);
        let mut out = [0xAA; 4];
        r.copy_or(1, &mut out, 0);
        assert_eq!(out, [2, 3, 0, 0]);
    }

    #[test]
    fn test_huge_offset_does_not_overflow() {
        let data = [1, 2];
        let r = ReportReader::new(&data);
        assert_eq!(r.u16_le_or(usize::MAX, 7), 7);
        let mut out = [0u8; 2];
        r.copy_or(usize::MAX, &mut out, 5);
        assert_eq!(out, [5, 5]);
    }

    #[test]
    fn test_bit_index_out_of_range_reads_released() {
        let data = [0xFF];
        let r = ReportReader::new(&data);
        assert!(!r.bit(0, 8));
    }
}
