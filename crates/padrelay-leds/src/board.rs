//! LED banks grouped per board

use crate::domain::{FlushReport, LedDomain, LedStatus, SetOutcome};
use crate::technology::LedTechnology;
use crate::writer::LedWriter;
use crate::{LedDomainId, LedError, LedResult, LedValue};

/// Object-safe view of one LED domain.
pub trait LedBank {
    fn id(&self) -> LedDomainId;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn set(&mut self, index: usize, value: LedValue, select_override: bool) -> LedResult<SetOutcome>;
    fn clear_override(&mut self, index: usize) -> LedResult<()>;
    fn set_brightness(&mut self, brightness: u8);
    fn flush(&mut self, writer: &mut dyn LedWriter) -> FlushReport;
    fn status(&self, index: usize) -> Option<LedStatus>;
}

impl<T: LedTechnology, const N: usize> LedBank for LedDomain<T, N> {
    fn id(&self) -> LedDomainId {
        LedDomain::id(self)
    }

    fn len(&self) -> usize {
        N
    }

    fn set(&mut self, index: usize, value: LedValue, select_override: bool) -> LedResult<SetOutcome> {
        self.set_desired(index, value, select_override)
    }

    fn clear_override(&mut self, index: usize) -> LedResult<()> {
        LedDomain::clear_override(self, index)
    }

    fn set_brightness(&mut self, brightness: u8) {
        LedDomain::set_brightness(self, brightness)
    }

    fn flush(&mut self, writer: &mut dyn LedWriter) -> FlushReport {
        LedDomain::flush(self, writer)
    }

    fn status(&self, index: usize) -> Option<LedStatus> {
        LedDomain::status(self, index)
    }
}

impl<L: LedBank + ?Sized> LedBank for Box<L> {
    fn id(&self) -> LedDomainId {
        (**self).id()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn set(&mut self, index: usize, value: LedValue, select_override: bool) -> LedResult<SetOutcome> {
        (**self).set(index, value, select_override)
    }

    fn clear_override(&mut self, index: usize) -> LedResult<()> {
        (**self).clear_override(index)
    }

    fn set_brightness(&mut self, brightness: u8) {
        (**self).set_brightness(brightness)
    }

    fn flush(&mut self, writer: &mut dyn LedWriter) -> FlushReport {
        (**self).flush(writer)
    }

    fn status(&self, index: usize) -> Option<LedStatus> {
        (**self).status(index)
    }
}

/// A domain the board does not populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoLeds(pub LedDomainId);

impl LedBank for NoLeds {
    fn id(&self) -> LedDomainId {
        self.0
    }

    fn len(&self) -> usize {
        0
    }

    fn set(&mut self, index: usize, _value: LedValue, _select_override: bool) -> LedResult<SetOutcome> {
        Err(LedError::IndexOutOfRange {
            domain: self.0,
            index,
            len: 0,
        })
    }

    fn clear_override(&mut self, index: usize) -> LedResult<()> {
        Err(LedError::IndexOutOfRange {
            domain: self.0,
            index,
            len: 0,
        })
    }

    fn set_brightness(&mut self, _brightness: u8) {}

    fn flush(&mut self, _writer: &mut dyn LedWriter) -> FlushReport {
        FlushReport::default()
    }

    fn status(&self, _index: usize) -> Option<LedStatus> {
        None
    }
}

/// The LED domains of one board, one bank per [`LedDomainId`].
pub trait BoardLeds {
    fn bank(&mut self, id: LedDomainId) -> &mut dyn LedBank;
    fn bank_ref(&self, id: LedDomainId) -> &dyn LedBank;

    fn set(&mut self, id: LedDomainId, index: usize, value: LedValue, select_override: bool) -> LedResult<SetOutcome> {
        self.bank(id).set(index, value, select_override)
    }

    fn set_brightness(&mut self, brightness: u8) {
        for id in LedDomainId::ALL {
            self.bank(id).set_brightness(brightness);
        }
    }

    /// Flushes every domain in [`LedDomainId::ALL`] order.
    fn flush_all(&mut self, writer: &mut dyn LedWriter) -> FlushReport {
        let mut report = FlushReport::default();
        for id in LedDomainId::ALL {
            report.absorb(self.bank(id).flush(writer));
        }
        report
    }
}

/// Board with one concrete bank per domain.
#[derive(Debug, Clone)]
pub struct Board<O, P, C> {
    pub onboard: O,
    pub peripheral: P,
    pub capacitive: C,
}

impl<O: LedBank, P: LedBank, C: LedBank> Board<O, P, C> {
    pub fn new(onboard: O, peripheral: P, capacitive: C) -> Self {
        Self {
            onboard,
            peripheral,
            capacitive,
        }
    }
}

impl<O: LedBank, P: LedBank, C: LedBank> BoardLeds for Board<O, P, C> {
    fn bank(&mut self, id: LedDomainId) -> &mut dyn LedBank {
        match id {
            LedDomainId::Onboard => &mut self.onboard,
            LedDomainId::Peripheral => &mut self.peripheral,
            LedDomainId::Capacitive => &mut self.capacitive,
        }
    }

    fn bank_ref(&self, id: LedDomainId) -> &dyn LedBank {
        match id {
            LedDomainId::Onboard => &self.onboard,
            LedDomainId::Peripheral => &self.peripheral,
            LedDomainId::Capacitive => &self.capacitive,
        }
    }
}

/// Board without any LEDs.
pub fn bare_board() -> Board<NoLeds, NoLeds, NoLeds> {
    Board::new(
        NoLeds(LedDomainId::Onboard),
        NoLeds(LedDomainId::Peripheral),
        NoLeds(LedDomainId::Capacitive),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::technology::{Apa102, Mpr121, Stp};
    use crate::writer::TransportError;
    use crate::LedColor;

    #[derive(Default)]
    struct Log(Vec<(LedDomainId, u16)>);

    impl LedWriter for Log {
        fn write(&mut self, domain: LedDomainId, address: u16, _bytes: &[u8]) -> Result<(), TransportError> {
            self.0.push((domain, address));
            Ok(())
        }
    }

    #[test]
    fn test_board_flushes_all_domains() -> Result<(), Box<dyn std::error::Error>> {
        let mut board = Board::new(
            LedDomain::<Apa102, 4>::new(LedDomainId::Onboard),
            LedDomain::<Stp, 16>::new(LedDomainId::Peripheral),
            LedDomain::<Mpr121, 8>::new(LedDomainId::Capacitive),
        );
        board.set(LedDomainId::Onboard, 0, LedValue::Rgb(LedColor::GREEN), false)?;
        board.set(LedDomainId::Peripheral, 12, LedValue::On, false)?;
        board.set(LedDomainId::Capacitive, 3, LedValue::On, false)?;

        let mut log = Log::default();
        let report = board.flush_all(&mut log);
        assert_eq!(report.writes, 3);
        assert_eq!(
            log.0,
            vec![
                (LedDomainId::Onboard, 0),
                (LedDomainId::Peripheral, 1),
                (LedDomainId::Capacitive, 0),
            ]
        );
        assert_eq!(board.flush_all(&mut log).writes, 0);
        assert_eq!(board.bank_ref(LedDomainId::Peripheral).len(), 16);
        Ok(())
    }

    #[test]
    fn test_boxed_banks_pick_technology_at_runtime() -> Result<(), Box<dyn std::error::Error>> {
        let onboard: Box<dyn LedBank> = Box::new(LedDomain::<Apa102, 2>::new(LedDomainId::Onboard));
        let peripheral: Box<dyn LedBank> = Box::new(NoLeds(LedDomainId::Peripheral));
        let capacitive: Box<dyn LedBank> = Box::new(LedDomain::<Mpr121, 8>::new(LedDomainId::Capacitive));
        let mut board = Board::new(onboard, peripheral, capacitive);
        board.set(LedDomainId::Capacitive, 7, LedValue::On, false)?;

        let mut log = Log::default();
        assert_eq!(board.flush_all(&mut log).writes, 1);
        assert_eq!(log.0, vec![(LedDomainId::Capacitive, 0)]);
        Ok(())
    }

    #[test]
    fn test_missing_domain_rejects_writes() {
        let mut board = bare_board();
        assert!(board.set(LedDomainId::Capacitive, 0, LedValue::On, false).is_err());
        assert!(board.bank_ref(LedDomainId::Onboard).is_empty());
        let mut log = Log::default();
        assert_eq!(board.flush_all(&mut log), FlushReport::default());
    }
}
