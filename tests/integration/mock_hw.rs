//! Mock hardware adapters for integration tests.
//!
//! Records every UART write, relay drive and emitted event so tests can
//! assert on the full history without touching real registers.

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use serial_relay::app::command::RelayState;
use serial_relay::app::events::AppEvent;
use serial_relay::app::ports::{EventSink, RelayPort, SerialPort};
use serial_relay::error::{GpioError, SerialError};

// ── MockUart ──────────────────────────────────────────────────

/// UART whose RX buffer is filled by the test. A read returns whatever is
/// buffered and `0` once drained, which is how a timeout looks.
#[derive(Default)]
pub struct MockUart {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    pub fail_status: bool,
    pub fail_read: bool,
    pub reads: usize,
}

#[allow(dead_code)]
impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes that arrive before the next poll cycle.
    pub fn send(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Everything written back, as text.
    pub fn tx_text(&self) -> String {
        String::from_utf8_lossy(&self.tx).into_owned()
    }
}

impl SerialPort for MockUart {
    fn available(&mut self) -> Result<usize, SerialError> {
        if self.fail_status {
            return Err(SerialError::StatusFailed);
        }
        Ok(self.rx.len())
    }

    fn read(&mut self, buf: &mut [u8], _timeout_ms: u32) -> Result<usize, SerialError> {
        self.reads += 1;
        if self.fail_read {
            return Err(SerialError::ReadFailed);
        }
        let n = buf.len().min(self.rx.len());
        for slot in &mut buf[..n] {
            *slot = self.rx.pop_front().unwrap();
        }
        Ok(n)
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        self.tx.extend_from_slice(bytes);
        Ok(())
    }
}

// ── MockPin ───────────────────────────────────────────────────

/// Digital output that remembers every level written.
#[derive(Default)]
pub struct MockPin {
    pub levels: Vec<bool>,
}

#[allow(dead_code)]
impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level; `None` if never written.
    pub fn is_high(&self) -> Option<bool> {
        self.levels.last().copied()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.push(true);
        Ok(())
    }
}

// ── MockRelay ─────────────────────────────────────────────────

/// Relay port that records drive calls and can be told to fail.
#[derive(Default)]
pub struct MockRelay {
    pub drives: Vec<RelayState>,
    pub fail: bool,
}

#[allow(dead_code)]
impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RelayPort for MockRelay {
    fn drive(&mut self, state: RelayState) -> Result<(), GpioError> {
        if self.fail {
            return Err(GpioError::WriteFailed);
        }
        self.drives.push(state);
        Ok(())
    }
}

// ── EventLog ──────────────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_changes(&self) -> Vec<(RelayState, RelayState)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
