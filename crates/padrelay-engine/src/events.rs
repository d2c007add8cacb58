//! Attach, detach and authentication notifications

use padrelay_device_types::{AddressSlot, ConsoleType, ProtocolHint};
use serde::{Deserialize, Serialize};

/// Events queued between two ticks.
pub const EVENT_QUEUE_LEN: usize = 16;

pub(crate) type EventQueue = heapless::Deque<DeviceEvent, EVENT_QUEUE_LEN>;

/// Notification from the transport or the handshake helper, applied at the
/// next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum DeviceEvent {
    Attached {
        slot: AddressSlot,
        vendor_id: u16,
        product_id: u16,
        #[serde(default)]
        hint: ProtocolHint,
    },
    Detached {
        slot: AddressSlot,
    },
    /// Detaches the first connection of a family, for transports that do
    /// not report the slot on removal.
    FamilyDetached {
        console_type: ConsoleType,
    },
    AuthenticationSucceeded {
        slot: AddressSlot,
    },
    HostConsoleChanged {
        console_type: ConsoleType,
    },
    /// Drops every connection.
    Reset,
}

impl DeviceEvent {
    pub fn ps3_connected(dev_addr: u8, vendor_id: u16, product_id: u16) -> Self {
        DeviceEvent::Attached {
            slot: AddressSlot::usb(dev_addr, 0),
            vendor_id,
            product_id,
            hint: ProtocolHint::Hid,
        }
    }

    pub fn ps4_connected(dev_addr: u8, vendor_id: u16, product_id: u16) -> Self {
        DeviceEvent::Attached {
            slot: AddressSlot::usb(dev_addr, 0),
            vendor_id,
            product_id,
            hint: ProtocolHint::Hid,
        }
    }

    /// `subtype` is the XInput capabilities subtype byte.
    pub fn xinput_connected(
        dev_addr: u8,
        instance: u8,
        vendor_id: u16,
        product_id: u16,
        subtype: u8,
    ) -> Self {
        DeviceEvent::Attached {
            slot: AddressSlot::usb(dev_addr, instance),
            vendor_id,
            product_id,
            hint: ProtocolHint::XInput { subtype },
        }
    }

    pub fn xbox_one_connected(dev_addr: u8, instance: u8, vendor_id: u16, product_id: u16) -> Self {
        DeviceEvent::Attached {
            slot: AddressSlot::usb(dev_addr, instance),
            vendor_id,
            product_id,
            hint: ProtocolHint::XboxOne,
        }
    }

    pub fn bluetooth_connected(handle: u16, vendor_id: u16, product_id: u16) -> Self {
        DeviceEvent::Attached {
            slot: AddressSlot::bluetooth(handle),
            vendor_id,
            product_id,
            hint: ProtocolHint::Hid,
        }
    }

    pub fn disconnected(slot: AddressSlot) -> Self {
        DeviceEvent::Detached { slot }
    }

    pub fn ps4_disconnected() -> Self {
        DeviceEvent::FamilyDetached {
            console_type: ConsoleType::Ps4,
        }
    }

    pub fn authentication_succeeded(slot: AddressSlot) -> Self {
        DeviceEvent::AuthenticationSucceeded { slot }
    }

    pub fn host_console_changed(console_type: ConsoleType) -> Self {
        DeviceEvent::HostConsoleChanged { console_type }
    }
}
