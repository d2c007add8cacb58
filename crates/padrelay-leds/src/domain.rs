//! Double-buffered LED domain

use crate::technology::{LedFrame, LedTechnology};
use crate::writer::LedWriter;
use crate::{LedDomainId, LedError, LedResult, LedValue};
use core::marker::PhantomData;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Largest `GROUP_LEN` a technology may declare.
pub const MAX_GROUP_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedEntry<C> {
    /// Owned by the override source; regular writes are ignored.
    pub select: bool,
    pub color: C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Updated,
    Unchanged,
    /// The entry is overridden and the regular write was dropped.
    Overridden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushReport {
    pub writes: usize,
    pub failed: usize,
    /// Entries still differing from the hardware after the flush.
    pub pending: usize,
}

impl FlushReport {
    pub fn absorb(&mut self, other: FlushReport) {
        self.writes += other.writes;
        self.failed += other.failed;
        self.pending += other.pending;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedSnapshot<C> {
    pub select: bool,
    pub current: C,
    pub last_sent: C,
}

/// Technology-independent view of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LedStatus {
    pub select: bool,
    pub pending: bool,
}

/// `N` LEDs of technology `T` on one bus.
#[derive(Debug, Clone)]
pub struct LedDomain<T: LedTechnology, const N: usize> {
    id: LedDomainId,
    current: [LedEntry<T::Color>; N],
    last_sent: [T::Color; N],
    brightness: u8,
    sent_brightness: u8,
    _technology: PhantomData<T>,
}

impl<T: LedTechnology, const N: usize> LedDomain<T, N> {
    /// All entries off, matching hardware fresh out of reset.
    pub fn new(id: LedDomainId) -> Self {
        Self {
            id,
            current: [LedEntry::default(); N],
            last_sent: [T::Color::default(); N],
            brightness: u8::MAX,
            sent_brightness: u8::MAX,
            _technology: PhantomData,
        }
    }

    pub fn id(&self) -> LedDomainId {
        self.id
    }

    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn out_of_range(&self, index: usize) -> LedError {
        LedError::IndexOutOfRange {
            domain: self.id,
            index,
            len: N,
        }
    }

    /// Changes the desired value of one entry; hardware is untouched until
    /// [`flush`](Self::flush).
    pub fn set_desired(
        &mut self,
        index: usize,
        value: LedValue,
        select_override: bool,
    ) -> LedResult<SetOutcome> {
        let err = self.out_of_range(index);
        let entry = self.current.get_mut(index).ok_or(err)?;
        if entry.select && !select_override {
            trace!("{} LED {} is overridden; ignoring {:?}", self.id, index, value);
            return Ok(SetOutcome::Overridden);
        }
        let color = T::color(value);
        let changed = entry.color != color;
        entry.color = color;
        entry.select |= select_override;
        Ok(if changed {
            SetOutcome::Updated
        } else {
            SetOutcome::Unchanged
        })
    }

    /// Returns the entry to regular writers; its colour stays until changed.
    pub fn clear_override(&mut self, index: usize) -> LedResult<()> {
        let err = self.out_of_range(index);
        let entry = self.current.get_mut(index).ok_or(err)?;
        entry.select = false;
        Ok(())
    }

    pub fn snapshot(&self, index: usize) -> Option<LedSnapshot<T::Color>> {
        let entry = self.current.get(index)?;
        let last_sent = *self.last_sent.get(index)?;
        Some(LedSnapshot {
            select: entry.select,
            current: entry.color,
            last_sent,
        })
    }

    pub fn status(&self, index: usize) -> Option<LedStatus> {
        self.snapshot(index).map(|s| LedStatus {
            select: s.select,
            pending: s.current != s.last_sent,
        })
    }

    /// Entries whose desired value has not reached the hardware.
    pub fn pending(&self) -> usize {
        self.current
            .iter()
            .zip(self.last_sent.iter())
            .filter(|(entry, sent)| entry.color != **sent)
            .count()
    }

    pub fn is_synced(&self) -> bool {
        self.pending() == 0 && (!T::USES_BRIGHTNESS || self.brightness == self.sent_brightness)
    }

    /// Writes every group containing a changed entry.
    ///
    /// A group's `last_sent` is updated only when its write succeeds; failed
    /// groups stay pending and are retried by the next flush.
    pub fn flush<W: LedWriter + ?Sized>(&mut self, writer: &mut W) -> FlushReport {
        let group_len = T::GROUP_LEN.clamp(1, MAX_GROUP_LEN);
        let rebright = T::USES_BRIGHTNESS && self.brightness != self.sent_brightness;
        let mut report = FlushReport::default();

        for (group, chunk) in self.current.chunks(group_len).enumerate() {
            let start = group * group_len;
            let sent = &mut self.last_sent[start..start + chunk.len()];
            let dirty = rebright || chunk.iter().zip(sent.iter()).any(|(e, s)| e.color != *s);
            if !dirty {
                continue;
            }

            let mut colors: heapless::Vec<T::Color, MAX_GROUP_LEN> = heapless::Vec::new();
            for entry in chunk {
                if colors.push(entry.color).is_err() {
                    break;
                }
            }
            let mut frame = LedFrame::new();
            T::pack(&colors, self.brightness, &mut frame);

            let address = group as u16;
            match writer.write(self.id, address, &frame) {
                Ok(()) => {
                    sent.copy_from_slice(&colors);
                    report.writes += 1;
                    trace!("{} {} group {} <- {:02X?}", self.id, T::NAME, address, frame.as_slice());
                }
                Err(err) if err.is_retryable() => {
                    report.failed += 1;
                    debug!("{} LED write to group {} deferred: {}", self.id, address, err);
                }
                Err(err) => {
                    report.failed += 1;
                    warn!("{} LED write to group {} failed: {}", self.id, address, err);
                }
            }
        }

        if report.failed == 0 {
            self.sent_brightness = self.brightness;
        }
        report.pending = self.pending();
        report
    }
}
