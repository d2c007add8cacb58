//! Report descriptor, neutral report and decode commands

use colored::*;
use padrelay_device_types::{CanonicalInputState, ConsoleType};
use padrelay_hid_common::{DescriptorBuf, ReportBuf};
use padrelay_hid_console_protocol::{
    CoordinateMode, DescriptorConfig, ProtocolError, build_report_descriptor, encode_secondary,
    neutral_report, update,
};

use crate::error::CliError;
use crate::{hex, output};

pub fn descriptor(
    console: ConsoleType,
    button_count: u8,
    coordinates: CoordinateMode,
) -> Result<DescriptorBuf, ProtocolError> {
    build_report_descriptor(
        console,
        &DescriptorConfig {
            button_count,
            coordinates,
        },
    )
}

/// Primary neutral report, then the secondary one where the family has it.
pub fn neutral_reports(console: ConsoleType) -> (ReportBuf, Option<ReportBuf>) {
    (
        neutral_report(console),
        encode_secondary(console, &CanonicalInputState::neutral()),
    )
}

/// Decodes several reports in order, each on top of the previous result.
pub fn decode_sequence(console: ConsoleType, reports: &[Vec<u8>]) -> CanonicalInputState {
    reports
        .iter()
        .fold(CanonicalInputState::neutral(), |state, raw| {
            update(console, raw, &state)
        })
}

pub fn execute_descriptor(
    console: ConsoleType,
    button_count: u8,
    coordinates: CoordinateMode,
    json: bool,
) -> Result<(), CliError> {
    let bytes = descriptor(console, button_count, coordinates)?;
    output::print_bytes("descriptor", &bytes, json)
}

pub fn execute_encode_neutral(console: ConsoleType, json: bool) -> Result<(), CliError> {
    let (primary, secondary) = neutral_reports(console);
    output::print_bytes("report", &primary, json)?;
    if let Some(secondary) = secondary {
        output::print_bytes("secondary", &secondary, json)?;
    }
    Ok(())
}

pub fn execute_decode(console: ConsoleType, reports: &[String], json: bool) -> Result<(), CliError> {
    let raw = reports
        .iter()
        .map(|r| hex::parse_bytes(r))
        .collect::<Result<Vec<_>, _>>()?;
    let state = decode_sequence(console, &raw);

    if json {
        return output::print_json("state", &state);
    }

    if state.is_neutral() {
        println!("{}", "neutral".dimmed());
        return Ok(());
    }
    output::print_field("buttons", format!("{:?}", state.buttons));
    output::print_field("hat", format!("{:?}", state.hat));
    output::print_field(
        "left stick",
        format!("{}, {}", state.left_stick.x, state.left_stick.y),
    );
    output::print_field(
        "right stick",
        format!("{}, {}", state.right_stick.x, state.right_stick.y),
    );
    output::print_field(
        "triggers",
        format!("{} / {}", state.left_trigger, state.right_trigger),
    );
    if !state.keyboard.is_idle() {
        output::print_field("keyboard", format!("{:?}", state.keyboard));
    }
    if !state.mouse.is_idle() {
        output::print_field("mouse", format!("{:?}", state.mouse));
    }
    if !state.motion.is_at_rest() {
        output::print_field("motion", format!("{:?}", state.motion));
    }
    output::print_field("battery", state.battery);
    Ok(())
}
