//! Device classification against the built-in registry

use colored::*;
use padrelay_device_types::{Classification, ConsoleType, ProtocolHint, SubType};
use padrelay_registry::Registry;
use serde::Serialize;

use crate::commands::HintArg;
use crate::error::CliError;
use crate::{hex, output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassifyReport {
    pub vendor_id: u16,
    pub product_id: u16,
    pub hint: ProtocolHint,
    pub classification: Classification,
    /// Family the engine drives the device as.
    pub console_type: ConsoleType,
    pub sub_type: SubType,
}

pub fn classify(vendor_id: u16, product_id: u16, hint: ProtocolHint) -> ClassifyReport {
    let classification = Registry::default().classify(vendor_id, product_id, hint);
    ClassifyReport {
        vendor_id,
        product_id,
        hint,
        classification,
        console_type: classification.console_type(),
        sub_type: classification.sub_type(),
    }
}

pub fn execute(vid: &str, pid: &str, hint: HintArg, subtype: u8, json: bool) -> Result<(), CliError> {
    let report = classify(hex::parse_id(vid)?, hex::parse_id(pid)?, hint.to_hint(subtype));

    if json {
        return output::print_json("device", &report);
    }

    let verdict = if report.classification.is_unknown() {
        "unknown (generic HID)".yellow()
    } else {
        "known".green()
    };
    println!(
        "{}",
        format!("{:04X}:{:04X}", report.vendor_id, report.product_id).bold()
    );
    output::print_field("classification", verdict);
    output::print_field("console type", report.console_type);
    output::print_field("sub type", format!("{:?}", report.sub_type));
    output::print_field("hint", format!("{:?}", report.hint));
    Ok(())
}
