//! Scripted engine runs against the in-memory transport
//!
//! A scenario is a YAML document with an optional engine config, an optional
//! board layout and a list of steps. Each step queues events, reports and
//! LED commands, then runs the engine for `ticks` ticks (default 1).
//!
//! ```yaml
//! config:
//!   host_console: ps3
//! steps:
//!   - events:
//!       - event: attached
//!         slot: { usb: { dev_addr: 1, instance: 0 } }
//!         vendor_id: 0x054C
//!         product_id: 0x0268
//!     ticks: 2
//! ```

use std::fs;
use std::path::Path;

use colored::*;
use padrelay_device_types::AddressSlot;
use padrelay_engine::{
    ConnectionInfo, DeviceEvent, Engine, EngineConfig, MemoryLedWriter, MemoryTransport,
    TickSummary,
};
use padrelay_leds::{
    Apa102, Board, BoardLeds, LedBank, LedDomain, LedDomainId, LedValue, Mpr121, NoLeds, Stp,
    Ws2812Spi,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CliError;
use crate::{hex, output};

pub type SimBoard = Board<Box<dyn LedBank>, Box<dyn LedBank>, Box<dyn LedBank>>;
pub type SimEngine = Engine<MemoryTransport, SimBoard, MemoryLedWriter>;

/// LED hardware fitted to one domain of the simulated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technology {
    /// 16 clocked RGB LEDs.
    Apa102,
    /// 16 WS2812 LEDs over SPI.
    Ws2812,
    /// 32 shift-register outputs.
    Stp,
    /// The 8 MPR121 GPIO LEDs.
    Mpr121,
    None,
}

impl Technology {
    pub fn bank(self, id: LedDomainId) -> Box<dyn LedBank> {
        match self {
            Technology::Apa102 => Box::new(LedDomain::<Apa102, 16>::new(id)),
            Technology::Ws2812 => Box::new(LedDomain::<Ws2812Spi, 16>::new(id)),
            Technology::Stp => Box::new(LedDomain::<Stp, 32>::new(id)),
            Technology::Mpr121 => Box::new(LedDomain::<Mpr121, { Mpr121::LED_COUNT }>::new(id)),
            Technology::None => Box::new(NoLeds(id)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardSpec {
    pub onboard: Technology,
    pub peripheral: Technology,
    pub capacitive: Technology,
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self {
            onboard: Technology::Apa102,
            peripheral: Technology::Stp,
            capacitive: Technology::Mpr121,
        }
    }
}

impl BoardSpec {
    pub fn build(&self) -> SimBoard {
        Board::new(
            self.onboard.bank(LedDomainId::Onboard),
            self.peripheral.bank(LedDomainId::Peripheral),
            self.capacitive.bank(LedDomainId::Capacitive),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub board: BoardSpec,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn one_tick() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    #[serde(default)]
    pub events: Vec<DeviceEvent>,
    #[serde(default)]
    pub reports: Vec<ScriptedReport>,
    #[serde(default)]
    pub leds: Vec<LedCommand>,
    pub host_ready: Option<bool>,
    pub brightness: Option<u8>,
    pub battery: Option<u8>,
    #[serde(default = "one_tick")]
    pub ticks: u32,
}

/// Inbound report; without a slot it comes from the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedReport {
    #[serde(default)]
    pub slot: Option<AddressSlot>,
    pub bytes: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedCommand {
    pub domain: LedDomainId,
    pub index: usize,
    #[serde(default)]
    pub value: LedValue,
    #[serde(default, rename = "override")]
    pub select_override: bool,
    /// Hands the LED back to the feedback bindings.
    #[serde(default)]
    pub release: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeripheralReport {
    pub slot: AddressSlot,
    pub bytes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedWriteRecord {
    pub domain: LedDomainId,
    pub address: u16,
    pub bytes: String,
}

/// Final state of an LED that is overridden or still unsent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedState {
    pub domain: LedDomainId,
    pub index: usize,
    pub select: bool,
    pub pending: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub ticks: Vec<TickSummary>,
    pub host_reports: Vec<String>,
    pub peripheral_reports: Vec<PeripheralReport>,
    pub led_writes: Vec<LedWriteRecord>,
    pub connections: Vec<ConnectionInfo>,
    pub leds: Vec<LedState>,
}

pub fn load(path: &Path) -> Result<Scenario, CliError> {
    let text = fs::read_to_string(path)?;
    let scenario: Scenario = serde_yaml::from_str(&text)?;
    info!(
        "Loaded scenario {} ({} steps, host {})",
        path.display(),
        scenario.steps.len(),
        scenario.config.host_console
    );
    Ok(scenario)
}

pub fn run(scenario: &Scenario) -> Result<SimulationReport, CliError> {
    let mut engine = Engine::init(
        scenario.config.clone(),
        MemoryTransport::new(),
        scenario.board.build(),
        MemoryLedWriter::new(),
    )?;

    let mut ticks = Vec::new();
    for (n, step) in scenario.steps.iter().enumerate() {
        apply_step(&mut engine, n, step)?;
        for _ in 0..step.ticks {
            ticks.push(engine.tick());
        }
    }
    Ok(report(&engine, ticks))
}

fn apply_step(engine: &mut SimEngine, n: usize, step: &Step) -> Result<(), CliError> {
    if let Some(ready) = step.host_ready {
        engine.transport_mut().set_host_ready(ready);
    }
    if let Some(brightness) = step.brightness {
        engine.set_brightness(brightness);
    }
    if let Some(level) = step.battery {
        engine.set_battery_state(level);
    }

    for led in &step.leds {
        if led.release {
            engine.clear_led_override(led.domain, led.index)?;
        } else {
            engine.set_led(led.domain, led.index, led.value, led.select_override)?;
        }
    }

    for event in &step.events {
        engine.push_event(*event)?;
    }

    for report in &step.reports {
        let bytes = hex::parse_bytes(&report.bytes)?;
        let queued = match report.slot {
            Some(slot) => engine.transport_mut().push_from_peripheral(slot, &bytes),
            None => engine.transport_mut().push_from_host(&bytes),
        };
        queued.map_err(|err| {
            CliError::ScenarioError(format!("step {n}: report {} not queued: {err}", report.bytes))
        })?;
    }

    debug!(
        "Step {}: {} events, {} reports, {} LED commands",
        n,
        step.events.len(),
        step.reports.len(),
        step.leds.len()
    );
    Ok(())
}

fn report(engine: &SimEngine, ticks: Vec<TickSummary>) -> SimulationReport {
    let transport = engine.transport();
    let mut leds = Vec::new();
    for domain in LedDomainId::ALL {
        let len = engine.board().bank_ref(domain).len();
        for index in 0..len {
            if let Some(status) = engine.led_status(domain, index)
                && (status.select || status.pending)
            {
                leds.push(LedState {
                    domain,
                    index,
                    select: status.select,
                    pending: status.pending,
                });
            }
        }
    }

    SimulationReport {
        ticks,
        host_reports: transport
            .host_sent
            .iter()
            .map(|r| hex::format_bytes(r))
            .collect(),
        peripheral_reports: transport
            .peripheral_sent
            .iter()
            .map(|(slot, r)| PeripheralReport {
                slot: *slot,
                bytes: hex::format_bytes(r),
            })
            .collect(),
        led_writes: engine
            .writer()
            .writes
            .iter()
            .map(|w| LedWriteRecord {
                domain: w.domain,
                address: w.address,
                bytes: hex::format_bytes(&w.bytes),
            })
            .collect(),
        connections: engine.connection_info().collect(),
        leds,
    }
}

pub fn execute(path: &Path, json: bool) -> Result<(), CliError> {
    let scenario = load(path)?;
    let report = run(&scenario)?;

    if json {
        return output::print_json("simulation", &report);
    }

    println!("{}", "Ticks".bold());
    for t in &report.ticks {
        let host = if t.host_not_ready {
            "host busy".yellow().to_string()
        } else {
            format!(
                "sent {} suppressed {}",
                t.host_reports_sent, t.host_reports_suppressed
            )
        };
        println!(
            "  #{:<4} in {:<2} drop {:<2} events {:<2} moves {:<2} {} | leds {}/{} pending {}",
            t.tick,
            t.reports_ingested,
            t.reports_dropped,
            t.events_processed,
            t.transitions,
            host,
            t.led_writes,
            t.led_failed,
            t.led_pending
        );
    }

    println!("{}", "Connections".bold());
    if report.connections.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for c in &report.connections {
        let degraded = if c.degraded { " (degraded)".yellow().to_string() } else { String::new() };
        println!(
            "  {} {:04X}:{:04X} {} {}{}",
            c.identity.slot,
            c.identity.vendor_id,
            c.identity.product_id,
            c.console_type,
            c.phase.to_string().green(),
            degraded
        );
    }

    println!("{} ({})", "Host reports".bold(), report.host_reports.len());
    for (i, bytes) in report.host_reports.iter().enumerate() {
        println!("  {i:>3}: {bytes}");
    }
    if !report.peripheral_reports.is_empty() {
        println!("{}", "Peripheral reports".bold());
        for r in &report.peripheral_reports {
            println!("  {}: {}", r.slot, r.bytes);
        }
    }

    println!("{} ({})", "LED writes".bold(), report.led_writes.len());
    for w in &report.led_writes {
        println!("  {} group {}: {}", w.domain, w.address, w.bytes);
    }
    for led in &report.leds {
        output::print_field(
            &format!("{} {}", led.domain, led.index),
            match (led.select, led.pending) {
                (true, true) => "override, pending",
                (true, false) => "override",
                _ => "pending",
            },
        );
    }
    Ok(())
}
