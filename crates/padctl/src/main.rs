//! padctl - padrelay inspection CLI
//!
//! Classifies USB IDs against the device registry, prints report descriptors
//! and neutral reports, decodes captured reports and replays scripted
//! scenarios through the translation engine.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod hex;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use padrelay_device_types::ConsoleType;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{CoordinateArg, HintArg, parse_console};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "padctl")]
#[command(about = "padrelay CLI - Inspect controller codecs and replay engine scenarios")]
#[command(version)]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a device by vendor and product ID
    Classify {
        /// Vendor ID in hex (054C or 0x054c)
        vid: String,
        /// Product ID in hex
        pid: String,
        /// Interface class seen by the transport
        #[arg(long, value_enum, default_value_t = HintArg::Hid)]
        hint: HintArg,
        /// XInput capabilities subtype (with --hint xinput)
        #[arg(long, default_value_t = 1)]
        subtype: u8,
    },

    /// Print the HID report descriptor presented for a console family
    Descriptor {
        #[arg(value_parser = parse_console)]
        console: ConsoleType,
        /// Buttons declared by the universal gamepad (1-16)
        #[arg(long, default_value_t = 15)]
        buttons: u8,
        /// Mouse coordinate mode
        #[arg(long, value_enum, default_value_t = CoordinateArg::Relative)]
        coordinates: CoordinateArg,
    },

    /// Print the report sent when nothing is pressed
    EncodeNeutral {
        #[arg(value_parser = parse_console)]
        console: ConsoleType,
    },

    /// Decode captured reports, in order, into the canonical state
    Decode {
        #[arg(value_parser = parse_console)]
        console: ConsoleType,
        /// Report bytes in hex, one argument per report
        #[arg(required = true)]
        reports: Vec<String>,
    },

    /// Run a YAML scenario through the engine
    Simulate {
        /// Scenario file
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_err| format!("padctl={log_level},padrelay={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let result = execute_command(&cli);

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Classify {
            vid,
            pid,
            hint,
            subtype,
        } => commands::classify::execute(vid, pid, *hint, *subtype, cli.json)?,
        Commands::Descriptor {
            console,
            buttons,
            coordinates,
        } => commands::codec::execute_descriptor(*console, *buttons, (*coordinates).into(), cli.json)?,
        Commands::EncodeNeutral { console } => {
            commands::codec::execute_encode_neutral(*console, cli.json)?
        }
        Commands::Decode { console, reports } => {
            commands::codec::execute_decode(*console, reports, cli.json)?
        }
        Commands::Simulate { scenario } => commands::simulate::execute(scenario, cli.json)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_classify_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["padctl", "classify", "054C", "0268"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        match &cli.command {
            Commands::Classify {
                vid,
                pid,
                hint,
                subtype,
            } => {
                assert_eq!(vid, "054C");
                assert_eq!(pid, "0268");
                assert_eq!(*hint, HintArg::Hid);
                assert_eq!(*subtype, 1);
            }
            _ => return Err("expected Classify command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_classify_xinput_hint() -> TestResult {
        let cli = Cli::try_parse_from([
            "padctl", "classify", "045e", "028e", "--hint", "xinput", "--subtype", "8",
        ])?;
        match &cli.command {
            Commands::Classify { hint, subtype, .. } => {
                assert_eq!(*hint, HintArg::Xinput);
                assert_eq!(*subtype, 8);
            }
            _ => return Err("expected Classify command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_global_json_flag_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["padctl", "encode-neutral", "ps4", "--json"])?;
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::EncodeNeutral {
                console: ConsoleType::Ps4
            }
        ));
        Ok(())
    }

    #[test]
    fn parse_verbose_levels() -> TestResult {
        for (args, expected) in [
            (vec!["padctl", "encode-neutral", "ps3"], 0),
            (vec!["padctl", "-v", "encode-neutral", "ps3"], 1),
            (vec!["padctl", "-vvv", "encode-neutral", "ps3"], 3),
        ] {
            assert_eq!(Cli::try_parse_from(args)?.verbose, expected);
        }
        Ok(())
    }

    #[test]
    fn parse_descriptor_options() -> TestResult {
        let cli = Cli::try_parse_from([
            "padctl",
            "descriptor",
            "keyboard-mouse",
            "--coordinates",
            "absolute",
        ])?;
        match &cli.command {
            Commands::Descriptor {
                console,
                buttons,
                coordinates,
            } => {
                assert_eq!(*console, ConsoleType::KeyboardMouse);
                assert_eq!(*buttons, 15);
                assert_eq!(*coordinates, CoordinateArg::Absolute);
            }
            _ => return Err("expected Descriptor command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_console() {
        assert!(Cli::try_parse_from(["padctl", "encode-neutral", "dreamcast"]).is_err());
    }

    #[test]
    fn parse_decode_requires_reports() -> TestResult {
        assert!(Cli::try_parse_from(["padctl", "decode", "ps3"]).is_err());
        let cli = Cli::try_parse_from(["padctl", "decode", "ps3", "00 00", "01 02"])?;
        match &cli.command {
            Commands::Decode { reports, .. } => assert_eq!(reports.len(), 2),
            _ => return Err("expected Decode command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_simulate_path() -> TestResult {
        let cli = Cli::try_parse_from(["padctl", "--json", "simulate", "scenario.yaml"])?;
        match &cli.command {
            Commands::Simulate { scenario } => {
                assert_eq!(scenario, &PathBuf::from("scenario.yaml"));
            }
            _ => return Err("expected Simulate command".into()),
        }
        Ok(())
    }
}
