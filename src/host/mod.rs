//! Host-side commander for the relay firmware.
//!
//! Talks to the device over any `Read + Write` byte stream: a real serial
//! port opened with [`open_serial`], or an in-memory stream in tests.
//!
//! ```text
//!   relayctl ──▶ probe ──▶ RelayLink ──"1"/"0"──▶ device
//!                              ◀──"Received: [1]"──
//! ```

pub mod link;
pub mod probe;

use std::time::Duration;

use thiserror::Error;

use crate::config::RelayConfig;

pub use link::{Exchange, RelayLink};
pub use probe::{candidate_ports, probe};

/// Default echo wait. The device answers only after its own inter-byte
/// timeout plus up to one poll interval, so this must clearly exceed both.
pub const DEFAULT_TIMEOUT_MS: u64 = 200;

/// Serial parameters used on the host side of the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSettings {
    pub baud_rate: u32,
    /// Read timeout; bounds how long [`RelayLink::recv_line`] waits.
    pub timeout_ms: u64,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            baud_rate: RelayConfig::default().baud_rate,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Errors raised by the host commander.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("could not connect to a serial device ({tried} port(s) tried)")]
    NoPort { tried: usize },

    #[error("serial I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serial(#[from] serialport::Error),
}

/// Open `name` as an 8N1 serial port with no flow control.
pub fn open_serial(
    name: &str,
    settings: &LinkSettings,
) -> Result<Box<dyn serialport::SerialPort>, LinkError> {
    let port = serialport::new(name, settings.baud_rate)
        .timeout(Duration::from_millis(settings.timeout_ms))
        .data_bits(serialport::DataBits::Eight)
        .stop_bits(serialport::StopBits::One)
        .parity(serialport::Parity::None)
        .flow_control(serialport::FlowControl::None)
        .open()?;
    Ok(port)
}
