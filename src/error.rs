//! Error types for the relay firmware.
//!
//! Port errors ([`SerialError`], [`GpioError`]) never stop the poll loop;
//! they are carried inside [`AppEvent`](crate::app::events::AppEvent)s, so
//! they are `Copy` and allocation-free. [`Error`] covers the bootstrap
//! failures that do abort startup.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Startup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Serial errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// The driver reported a read failure (framing, overrun, driver error).
    ReadFailed,
    /// Writing to the TX FIFO failed.
    WriteFailed,
    /// Querying the RX buffer level failed.
    StatusFailed,
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "UART read failed"),
            Self::WriteFailed => write!(f, "UART write failed"),
            Self::StatusFailed => write!(f, "UART status query failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Setting the output level failed.
    WriteFailed,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "GPIO write failed"),
        }
    }
}
