//! Per-device connection records

use core::fmt;
use padrelay_device_types::{AddressSlot, CanonicalInputState, ConsoleType, DeviceIdentity};
use padrelay_hid_common::ReportBuf;
use padrelay_hid_console_protocol as codec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Connection lifecycle. `Disconnected` is never stored; records are
/// removed when they leave `Disconnecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Disconnected,
    Connecting,
    Authenticating,
    Active,
    Disconnecting,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Disconnected => "disconnected",
            Phase::Connecting => "connecting",
            Phase::Authenticating => "authenticating",
            Phase::Active => "active",
            Phase::Disconnecting => "disconnecting",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a peripheral must answer the host's accessory authentication.
pub fn needs_authentication(peripheral: ConsoleType, host: ConsoleType) -> bool {
    matches!(
        (peripheral, host),
        (ConsoleType::Ps4, ConsoleType::Ps4) | (ConsoleType::XboxOne, ConsoleType::XboxOne)
    )
}

/// Handshake bookkeeping while a connection authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthSession {
    /// Sequence number of the challenge in flight.
    pub nonce: Option<u8>,
    pub challenges: u16,
    pub responses: u16,
}

/// Serializable view of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub identity: DeviceIdentity,
    pub console_type: ConsoleType,
    pub phase: Phase,
    pub degraded: bool,
    pub auth: Option<AuthSession>,
}

#[derive(Debug, Clone)]
pub struct Connection {
    identity: DeviceIdentity,
    phase: Phase,
    auth: Option<AuthSession>,
    state: CanonicalInputState,
    pending: Option<ReportBuf>,
    degraded: bool,
    transitioned: bool,
    /// Host changed after this record already moved in the tick.
    renegotiate_pending: bool,
}

impl Connection {
    /// A fresh record in `Connecting`; creation counts as this tick's
    /// transition.
    pub fn new(identity: DeviceIdentity) -> Self {
        let degraded = identity.is_unknown();
        if degraded {
            info!(
                "{} {:04X}:{:04X} is not in the registry; driving it as a generic HID gamepad",
                identity.slot, identity.vendor_id, identity.product_id
            );
        }
        Self {
            identity,
            phase: Phase::Connecting,
            auth: None,
            state: CanonicalInputState::neutral(),
            pending: None,
            degraded,
            transitioned: true,
            renegotiate_pending: false,
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn slot(&self) -> AddressSlot {
        self.identity.slot
    }

    pub fn console_type(&self) -> ConsoleType {
        self.identity.console_type()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn auth(&self) -> Option<&AuthSession> {
        self.auth.as_ref()
    }

    pub fn state(&self) -> &CanonicalInputState {
        &self.state
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn has_pending_report(&self) -> bool {
        self.pending.is_some()
    }

    /// Input reaches the host only from active connections.
    pub fn is_forwarding(&self) -> bool {
        self.phase == Phase::Active && !self.renegotiate_pending
    }

    pub fn is_renegotiation_pending(&self) -> bool {
        self.renegotiate_pending
    }

    /// Reports are decoded while active and while authenticating.
    pub fn is_decoding(&self) -> bool {
        matches!(self.phase, Phase::Active | Phase::Authenticating)
    }

    pub fn info(&self) -> ConnectionInfo {
        ConnectionInfo {
            identity: self.identity,
            console_type: self.console_type(),
            phase: self.phase,
            degraded: self.degraded,
            auth: self.auth,
        }
    }

    pub(crate) fn begin_tick(&mut self) {
        self.transitioned = false;
    }

    fn transition(&mut self, to: Phase) -> bool {
        if self.transitioned || self.phase == to {
            return false;
        }
        debug!("{}: {} -> {}", self.identity.slot, self.phase, to);
        self.phase = to;
        self.transitioned = true;
        true
    }

    /// Moves a connecting record to `Authenticating` or `Active` for `host`.
    /// A renegotiation deferred from an earlier tick runs first.
    pub(crate) fn advance(&mut self, host: ConsoleType) -> bool {
        if self.renegotiate_pending {
            return self.renegotiate();
        }
        if self.phase != Phase::Connecting {
            return false;
        }
        if needs_authentication(self.console_type(), host) {
            let moved = self.transition(Phase::Authenticating);
            if moved {
                self.auth = Some(AuthSession::default());
            }
            moved
        } else {
            self.transition(Phase::Active)
        }
    }

    pub(crate) fn authentication_succeeded(&mut self) -> bool {
        if self.phase != Phase::Authenticating {
            return false;
        }
        let moved = self.transition(Phase::Active);
        if moved {
            info!("{}: authentication complete", self.identity.slot);
            self.auth = None;
        }
        moved
    }

    /// Restarts negotiation, used when the host console changes. A record
    /// that already moved this tick renegotiates on the next one and stops
    /// forwarding until then.
    pub(crate) fn renegotiate(&mut self) -> bool {
        if self.phase == Phase::Connecting {
            self.renegotiate_pending = false;
            return false;
        }
        if self.transitioned {
            if !self.renegotiate_pending {
                info!(
                    "{}: already moved this tick, renegotiating on the next",
                    self.identity.slot
                );
            }
            self.renegotiate_pending = true;
            return false;
        }
        let moved = self.transition(Phase::Connecting);
        if moved {
            self.auth = None;
            self.renegotiate_pending = false;
        }
        moved
    }

    /// Last step before the record is released; pending data goes with it.
    pub(crate) fn begin_disconnect(&mut self) {
        debug!("{}: {} -> {}", self.identity.slot, self.phase, Phase::Disconnecting);
        self.phase = Phase::Disconnecting;
        self.transitioned = true;
        self.pending = None;
        self.auth = None;
    }

    /// Keeps only the latest undecoded report.
    pub(crate) fn store_report(&mut self, raw: ReportBuf) {
        self.pending = Some(raw);
    }

    pub(crate) fn record_challenge(&mut self, nonce: Option<u8>) {
        if let Some(auth) = self.auth.as_mut() {
            auth.nonce = nonce;
            auth.challenges = auth.challenges.saturating_add(1);
        }
    }

    pub(crate) fn record_response(&mut self) {
        if let Some(auth) = self.auth.as_mut() {
            auth.responses = auth.responses.saturating_add(1);
        }
    }

    /// Decodes the pending report on top of the current state. Without a
    /// new report the previous state stands.
    pub(crate) fn decode_pending(&mut self) -> bool {
        if !self.is_decoding() {
            return false;
        }
        match self.pending.take() {
            Some(raw) => {
                self.state = codec::update(self.console_type(), &raw, &self.state);
                true
            }
            None => false,
        }
    }
}
