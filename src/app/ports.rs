//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RelayService (domain)
//! ```
//!
//! Driven adapters (UART, relay pin, event sinks) implement these traits.
//! The [`RelayService`](super::service::RelayService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::error::{GpioError, SerialError};

use super::command::RelayState;

// ───────────────────────────────────────────────────────────────
// Serial port (driven adapter: UART ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Byte-level access to the command UART.
pub trait SerialPort {
    /// Number of bytes currently waiting in the receive buffer.
    fn available(&mut self) -> Result<usize, SerialError>;

    /// Read up to `buf.len()` bytes, waiting at most `timeout_ms` for data.
    ///
    /// A timeout is not an error: it returns `Ok(0)`.
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, SerialError>;

    /// Queue `bytes` for transmission.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), SerialError>;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to set the relay output.
pub trait RelayPort {
    /// Drive the output to match `state`.
    fn drive(&mut self, state: RelayState) -> Result<(), GpioError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
