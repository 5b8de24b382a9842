//! Serial relay host tool.
//!
//! Finds the relay board among the serial ports and switches it.
//!
//! Usage:
//!   relayctl list                         # list serial ports
//!   relayctl on                           # energise the relay
//!   relayctl -p /dev/ttyUSB0 off          # release it on a given port
//!   relayctl cycle --count 10             # on/off ten times, 1 s apart

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, warn};

use serial_relay::app::command::RelayState;
use serial_relay::host::{self, Exchange, LinkSettings, RelayLink};

#[derive(Parser)]
#[command(name = "relayctl")]
#[command(version)]
#[command(about = "Drive a serial relay board from the host", long_about = None)]
struct Cli {
    /// Serial port to use; repeat to probe several in order (default: every detected port)
    #[arg(short, long = "port")]
    ports: Vec<String>,

    /// Baud rate
    #[arg(short, long, default_value_t = LinkSettings::default().baud_rate)]
    baud: u32,

    /// How long to wait for the device's echo, in milliseconds
    #[arg(short, long, default_value_t = LinkSettings::default().timeout_ms)]
    timeout_ms: u64,

    /// Print each exchange as a JSON line
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, ...)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List serial ports reported by the OS
    List,
    /// Switch the relay on
    On,
    /// Switch the relay off
    Off,
    /// Switch on and off repeatedly
    Cycle {
        /// Number of on/off pairs
        #[arg(short, long, default_value_t = 10)]
        count: u32,
        /// Pause after each command, in milliseconds
        #[arg(long, default_value_t = 1000)]
        period_ms: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    stderrlog::new()
        .module(module_path!())
        .module("serial_relay")
        .verbosity(usize::from(cli.verbose) + 1)
        .init()
        .context("failed to initialise logging")?;

    let settings = LinkSettings {
        baud_rate: cli.baud,
        timeout_ms: cli.timeout_ms,
    };

    match cli.command {
        Commands::List => list_ports(),
        Commands::On => switch(&cli.ports, &settings, cli.json, RelayState::On),
        Commands::Off => switch(&cli.ports, &settings, cli.json, RelayState::Off),
        Commands::Cycle { count, period_ms } => {
            let mut link = connect(&cli.ports, &settings)?;
            link.cycle(
                count,
                Duration::from_millis(period_ms),
                thread::sleep,
                |ex| report(&ex, cli.json),
            )
        }
    }
}

/// List serial ports.
fn list_ports() -> Result<()> {
    let ports = serialport::available_ports().context("failed to enumerate serial ports")?;
    if ports.is_empty() {
        println!("No serial ports found");
    }
    for p in ports {
        println!("{:<24} {:?}", p.port_name, p.port_type);
    }
    Ok(())
}

fn connect(
    ports: &[String],
    settings: &LinkSettings,
) -> Result<RelayLink<Box<dyn serialport::SerialPort>>> {
    let candidates = host::candidate_ports(ports)?;
    let (name, io) = host::probe(&candidates, |name| host::open_serial(name, settings))?;
    // Drop boot output and anything else queued before the first command.
    io.clear(serialport::ClearBuffer::Input)
        .with_context(|| format!("failed to clear input on {name}"))?;
    Ok(RelayLink::new(io))
}

fn switch(ports: &[String], settings: &LinkSettings, json: bool, state: RelayState) -> Result<()> {
    let mut link = connect(ports, settings)?;
    let ex = link.set(state)?;
    report(&ex, json)
}

fn report(ex: &Exchange, json: bool) -> Result<()> {
    for line in &ex.skipped {
        debug!("Skipped before echo: {}", line);
    }
    if !ex.echo_matches() {
        warn!("Unexpected reply to {:?}: {:?}", ex.sent, ex.reply);
    }
    if json {
        println!("{}", serde_json::to_string(ex)?);
    } else {
        println!("Sent: {:?} | Reply: {}", ex.sent, ex.reply);
    }
    Ok(())
}
