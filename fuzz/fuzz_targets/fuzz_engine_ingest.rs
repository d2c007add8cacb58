//! Drives the engine with arbitrary inbound reports from a host and two
//! attached peripherals. No input may panic the tick.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_engine_ingest
#![no_main]
use libfuzzer_sys::fuzz_target;
use padrelay_device_types::{AddressSlot, ConsoleType};
use padrelay_engine::{DeviceEvent, Engine, EngineConfig, MemoryLedWriter, MemoryTransport};
use padrelay_leds::bare_board;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let host = ConsoleType::ALL[usize::from(selector) % ConsoleType::ALL.len()];
    let Ok(mut engine) = Engine::init(
        EngineConfig::for_host(host),
        MemoryTransport::new(),
        bare_board(),
        MemoryLedWriter::new(),
    ) else {
        return;
    };

    let pads = [AddressSlot::usb(1, 0), AddressSlot::usb(2, 0)];
    let _ = engine.push_event(DeviceEvent::ps4_connected(1, 0x054C, 0x05C4));
    let _ = engine.push_event(DeviceEvent::xbox_one_connected(2, 0, 0x045E, 0x02EA));
    engine.tick();

    for chunk in rest.chunks(24) {
        let Some((&route, bytes)) = chunk.split_first() else {
            continue;
        };
        let _ = match route % 3 {
            0 => engine.transport_mut().push_from_host(bytes),
            n => engine.transport_mut().push_from_peripheral(pads[usize::from(n - 1)], bytes),
        };
        if route & 0x80 != 0 {
            let _ = engine.push_event(DeviceEvent::authentication_succeeded(pads[0]));
        }
        engine.tick();
    }
});
