//! Tick scheduler
//!
//! [`Engine::tick`] is the only place that does work. It runs the same
//! steps in the same order every time and never blocks: a transport that
//! cannot take a report now gets it again on a later tick.

use crate::config::EngineConfig;
use crate::connection::{Connection, ConnectionInfo, Phase};
use crate::error::{ConfigError, EngineError, EngineResult};
use crate::events::{DeviceEvent, EventQueue};
use crate::feedback::{accumulate, binding_value};
use crate::ports::{InboundReport, ReportSource, Transport};
use core::fmt;
use padrelay_device_types::{AddressSlot, CanonicalInputState, ConsoleType};
use padrelay_hid_common::ReportBuf;
use padrelay_hid_console_protocol::{self as codec, HostFeedback, Rumble};
use padrelay_leds::{
    BoardLeds, LedBank, LedDomainId, LedStatus, LedValue, LedWriter, SetOutcome, TransportError,
};
use padrelay_registry::{Registry, RegistryResult};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

/// Connection records the engine tracks at once.
pub const MAX_CONNECTIONS: usize = 8;

/// Counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TickSummary {
    pub tick: u64,
    pub reports_ingested: usize,
    /// Reports with no connection, no authenticating peer or no content.
    pub reports_dropped: usize,
    pub events_processed: usize,
    pub events_rejected: usize,
    pub transitions: usize,
    pub decoded: usize,
    pub host_reports_sent: usize,
    pub host_reports_suppressed: usize,
    pub host_not_ready: bool,
    pub handshake_relayed: usize,
    pub rumble_sent: usize,
    pub send_failures: usize,
    pub led_writes: usize,
    pub led_failed: usize,
    pub led_pending: usize,
}

fn log_send_failure(target: impl fmt::Display, err: TransportError) {
    if err.is_retryable() {
        debug!("Send to {} deferred: {}", target, err);
    } else {
        warn!("Send to {} failed: {}", target, err);
    }
}

/// Owns every piece of runtime state; one instance per adapter.
pub struct Engine<T, B, W> {
    config: EngineConfig,
    registry: Registry,
    transport: T,
    board: B,
    writer: W,
    connections: heapless::Vec<Connection, MAX_CONNECTIONS>,
    events: EventQueue,
    feedback: Option<HostFeedback>,
    last_primary: Option<ReportBuf>,
    last_secondary: Option<ReportBuf>,
    battery: Option<u8>,
    ticks: u64,
}

impl<T: Transport, B: BoardLeds, W: LedWriter> Engine<T, B, W> {
    /// Validates `config` against the board and applies the brightness.
    pub fn init(config: EngineConfig, transport: T, mut board: B, writer: W) -> EngineResult<Self> {
        config.validate()?;
        for (binding, b) in config.feedback_bindings.iter().enumerate() {
            let len = board.bank_ref(b.domain).len();
            if b.index >= len {
                return Err(ConfigError::BindingOutOfRange {
                    binding,
                    domain: b.domain,
                    index: b.index,
                    len,
                }
                .into());
            }
        }
        board.set_brightness(config.brightness);
        info!(
            "Engine ready: host {}, {} feedback bindings",
            config.host_console,
            config.feedback_bindings.len()
        );
        Ok(Self {
            config,
            registry: Registry::default(),
            transport,
            board,
            writer,
            connections: heapless::Vec::new(),
            events: EventQueue::new(),
            feedback: None,
            last_primary: None,
            last_secondary: None,
            battery: None,
            ticks: 0,
        })
    }

    /// Classifies against `registry` instead of the built-in table.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Queues an event for the next tick.
    pub fn push_event(&mut self, event: DeviceEvent) -> EngineResult<()> {
        self.events.push_back(event).map_err(|rejected| {
            warn!("Event queue full; dropping {:?}", rejected);
            EngineError::queue_full()
        })
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// One service cycle.
    pub fn tick(&mut self) -> TickSummary {
        self.ticks += 1;
        let mut summary = TickSummary {
            tick: self.ticks,
            ..TickSummary::default()
        };
        for conn in self.connections.iter_mut() {
            conn.begin_tick();
        }

        self.ingest(&mut summary);
        self.process_events(&mut summary);
        self.decode(&mut summary);
        self.dispatch(&mut summary);
        self.apply_feedback(&mut summary);

        trace!("Tick {}: {:?}", self.ticks, summary);
        summary
    }

    fn ingest(&mut self, summary: &mut TickSummary) {
        for _ in 0..self.config.max_reports_per_tick {
            let Some(InboundReport { source, bytes }) = self.transport.poll_report() else {
                break;
            };
            summary.reports_ingested += 1;
            match source {
                ReportSource::Host => self.ingest_host(bytes, summary),
                ReportSource::Peripheral(slot) => self.ingest_peripheral(slot, bytes, summary),
            }
        }
    }

    fn ingest_host(&mut self, bytes: ReportBuf, summary: &mut TickSummary) {
        let host = self.config.host_console;
        if codec::is_handshake_report(host, &bytes) {
            let authenticating = self
                .connections
                .iter_mut()
                .find(|c| c.phase() == Phase::Authenticating);
            let Some(conn) = authenticating else {
                debug!("No peripheral is authenticating; dropping {} handshake report", host);
                summary.reports_dropped += 1;
                return;
            };
            conn.record_challenge(codec::handshake_sequence(host, &bytes));
            let slot = conn.slot();
            match self.transport.send_to_peripheral(slot, &bytes) {
                Ok(()) => summary.handshake_relayed += 1,
                Err(err) => {
                    summary.send_failures += 1;
                    log_send_failure(slot, err);
                }
            }
            return;
        }

        let feedback = codec::decode_feedback(host, &bytes);
        if feedback.is_empty() {
            summary.reports_dropped += 1;
            return;
        }
        accumulate(self.feedback.get_or_insert_with(HostFeedback::default), feedback);
    }

    fn ingest_peripheral(&mut self, slot: AddressSlot, bytes: ReportBuf, summary: &mut TickSummary) {
        let Some(conn) = self.connections.iter_mut().find(|c| c.slot() == slot) else {
            trace!("Dropping report from {} with no connection", slot);
            summary.reports_dropped += 1;
            return;
        };
        if conn.phase() == Phase::Authenticating && codec::is_handshake_report(conn.console_type(), &bytes) {
            conn.record_response();
            match self.transport.send_to_host(&bytes) {
                Ok(()) => summary.handshake_relayed += 1,
                Err(err) => {
                    summary.send_failures += 1;
                    log_send_failure("host", err);
                }
            }
            return;
        }
        conn.store_report(bytes);
    }

    fn process_events(&mut self, summary: &mut TickSummary) {
        while let Some(event) = self.events.pop_front() {
            summary.events_processed += 1;
            if let Err(err) = self.apply_event(event, summary) {
                summary.events_rejected += 1;
                if err.is_recoverable() {
                    debug!("Ignoring {:?}: {}", event, err);
                } else {
                    warn!("Rejected {:?}: {}", event, err);
                }
            }
        }

        let host = self.config.host_console;
        for conn in self.connections.iter_mut() {
            if conn.advance(host) {
                summary.transitions += 1;
            }
        }
    }

    fn apply_event(&mut self, event: DeviceEvent, summary: &mut TickSummary) -> EngineResult<()> {
        match event {
            DeviceEvent::Attached {
                slot,
                vendor_id,
                product_id,
                hint,
            } => {
                if self.remove(slot) {
                    debug!("{} attached again; previous connection dropped", slot);
                    summary.transitions += 1;
                }
                let identity = self.registry.identify(vendor_id, product_id, hint, slot);
                self.connections
                    .push(Connection::new(identity))
                    .map_err(|_rejected| EngineError::ConnectionTableFull {
                        capacity: MAX_CONNECTIONS,
                    })?;
                summary.transitions += 1;
                info!(
                    "{} attached: {:04X}:{:04X} as {} {:?}",
                    slot,
                    vendor_id,
                    product_id,
                    identity.console_type(),
                    identity.sub_type()
                );
            }
            DeviceEvent::Detached { slot } => {
                if !self.remove(slot) {
                    return Err(EngineError::UnknownSlot(slot));
                }
                summary.transitions += 1;
            }
            DeviceEvent::FamilyDetached { console_type } => {
                let slot = self.resolve_address_for(console_type)?;
                if self.remove(slot) {
                    summary.transitions += 1;
                }
            }
            DeviceEvent::AuthenticationSucceeded { slot } => {
                let conn = self
                    .connections
                    .iter_mut()
                    .find(|c| c.slot() == slot)
                    .ok_or(EngineError::UnknownSlot(slot))?;
                if !conn.authentication_succeeded() {
                    return Err(EngineError::NotAuthenticating(slot));
                }
                summary.transitions += 1;
            }
            DeviceEvent::HostConsoleChanged { console_type } => {
                if console_type == self.config.host_console {
                    return Ok(());
                }
                info!("Host console {} -> {}", self.config.host_console, console_type);
                self.config.host_console = console_type;
                self.last_primary = None;
                self.last_secondary = None;
                self.feedback = None;
                for conn in self.connections.iter_mut() {
                    if conn.renegotiate() {
                        summary.transitions += 1;
                    }
                }
            }
            DeviceEvent::Reset => {
                let dropped = self.connections.len();
                for conn in self.connections.iter_mut() {
                    conn.begin_disconnect();
                }
                self.connections.clear();
                summary.transitions += dropped;
                info!("Reset: {} connections dropped", dropped);
            }
        }
        Ok(())
    }

    /// Releases the record at `slot` together with its pending report.
    fn remove(&mut self, slot: AddressSlot) -> bool {
        let Some(index) = self.connections.iter().position(|c| c.slot() == slot) else {
            return false;
        };
        let mut conn = self.connections.remove(index);
        conn.begin_disconnect();
        info!("{} detached ({})", slot, conn.console_type());
        true
    }

    fn decode(&mut self, summary: &mut TickSummary) {
        for conn in self.connections.iter_mut() {
            if conn.decode_pending() {
                summary.decoded += 1;
            }
        }
    }

    /// Merged state of every forwarding connection, in attach order.
    pub fn merged_state(&self) -> CanonicalInputState {
        let mut merged = CanonicalInputState::neutral();
        for conn in self.connections.iter().filter(|c| c.is_forwarding()) {
            merged.merge(conn.state());
        }
        if let Some(level) = self.battery {
            merged.battery = level;
        }
        merged
    }

    fn dispatch(&mut self, summary: &mut TickSummary) {
        let host = self.config.host_console;
        let merged = self.merged_state();
        let primary = codec::encode(host, &merged);
        let secondary = codec::encode_secondary(host, &merged);

        let suppress = self.config.suppress_unchanged;
        let primary_due = !suppress || self.last_primary.as_ref() != Some(&primary);
        let secondary_due = secondary
            .as_ref()
            .is_some_and(|s| !suppress || self.last_secondary.as_ref() != Some(s));
        if !primary_due && !secondary_due {
            summary.host_reports_suppressed += 1;
            return;
        }
        if !self.transport.host_ready() {
            trace!("Host endpoint busy; holding {} report", host);
            summary.host_not_ready = true;
            return;
        }

        if primary_due {
            match self.transport.send_to_host(&primary) {
                Ok(()) => {
                    summary.host_reports_sent += 1;
                    self.last_primary = Some(primary);
                }
                Err(err) => {
                    summary.send_failures += 1;
                    log_send_failure("host", err);
                }
            }
        }
        if let (true, Some(report)) = (secondary_due, secondary) {
            match self.transport.send_to_host(&report) {
                Ok(()) => {
                    summary.host_reports_sent += 1;
                    self.last_secondary = Some(report);
                }
                Err(err) => {
                    summary.send_failures += 1;
                    log_send_failure("host", err);
                }
            }
        }
    }

    fn apply_feedback(&mut self, summary: &mut TickSummary) {
        if let Some(feedback) = self.feedback.take() {
            for binding in self.config.feedback_bindings.iter() {
                let Some(value) = binding_value(binding, &feedback) else {
                    continue;
                };
                match self.board.set(binding.domain, binding.index, value, false) {
                    Ok(SetOutcome::Overridden) => {
                        trace!("{} LED {} overridden; feedback ignored", binding.domain, binding.index);
                    }
                    Ok(_) => {}
                    Err(err) => warn!("Feedback binding {:?}: {}", binding.source, err),
                }
            }
            if let (true, Some(rumble)) = (self.config.relay_rumble, feedback.rumble) {
                self.relay_rumble(rumble, summary);
            }
        }

        let report = self.board.flush_all(&mut self.writer);
        summary.led_writes = report.writes;
        summary.led_failed = report.failed;
        summary.led_pending = report.pending;
    }

    fn relay_rumble(&mut self, rumble: Rumble, summary: &mut TickSummary) {
        for conn in self.connections.iter().filter(|c| c.is_forwarding()) {
            let Some(report) = codec::encode_rumble(conn.console_type(), rumble) else {
                continue;
            };
            match self.transport.send_to_peripheral(conn.slot(), &report) {
                Ok(()) => summary.rumble_sent += 1,
                Err(err) => {
                    summary.send_failures += 1;
                    log_send_failure(conn.slot(), err);
                }
            }
        }
    }

    /// Slot of the first live connection implementing `console_type`.
    pub fn resolve_address_for(&self, console_type: ConsoleType) -> RegistryResult<AddressSlot> {
        padrelay_registry::resolve_address_for(console_type, self.connections.iter().map(Connection::identity))
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.config.brightness = brightness;
        self.board.set_brightness(brightness);
    }

    /// Battery level reported to the host in place of the peripherals'.
    pub fn set_battery_state(&mut self, level: u8) {
        self.battery = Some(level);
    }

    /// Sets an LED directly; `select_override` takes ownership from
    /// feedback bindings until [`clear_led_override`](Self::clear_led_override).
    pub fn set_led(
        &mut self,
        domain: LedDomainId,
        index: usize,
        value: LedValue,
        select_override: bool,
    ) -> EngineResult<SetOutcome> {
        Ok(self.board.set(domain, index, value, select_override)?)
    }

    pub fn clear_led_override(&mut self, domain: LedDomainId, index: usize) -> EngineResult<()> {
        Ok(self.board.bank(domain).clear_override(index)?)
    }

    pub fn led_status(&self, domain: LedDomainId, index: usize) -> Option<LedStatus> {
        self.board.bank_ref(domain).status(index)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn host_console(&self) -> ConsoleType {
        self.config.host_console
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, slot: AddressSlot) -> Option<&Connection> {
        self.connections.iter().find(|c| c.slot() == slot)
    }

    pub fn connection_info(&self) -> impl Iterator<Item = ConnectionInfo> + '_ {
        self.connections.iter().map(Connection::info)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}
