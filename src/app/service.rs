//! Relay service — the hexagonal core.
//!
//! [`RelayService`] owns the relay state and the poll-cycle logic. All I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  SerialPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │      RelayService       │
//!   RelayPort ◀── │  read · decode · drive  │
//!                 └────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use log::{debug, info, warn};

use crate::config::RelayConfig;
use crate::error::SerialError;

use super::command::{self, MAX_COMMAND_LEN, RelayCommand, RelayState};
use super::events::{AppEvent, RelayStatus};
use super::ports::{EventSink, RelayPort, SerialPort};

/// Prefix of the diagnostic echo line.
const ECHO_PREFIX: &[u8] = b"Received: [";
/// Suffix of the diagnostic echo line (CRLF terminated).
const ECHO_SUFFIX: &[u8] = b"]\r\n";

/// Result of a single poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No input was pending (or the UART failed); the relay was not touched.
    Idle,
    /// A command was read and applied.
    Applied(RelayCommand),
}

// ───────────────────────────────────────────────────────────────
// RelayService
// ───────────────────────────────────────────────────────────────

/// The relay service orchestrates read → decode → actuate.
pub struct RelayService {
    config: RelayConfig,
    state: RelayState,
    cycles: u64,
    commands: u64,
    last_command: Option<RelayCommand>,
}

impl RelayService {
    /// Construct the service from configuration. The relay is considered
    /// Off until [`start`](Self::start) drives it.
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            state: RelayState::Off,
            cycles: 0,
            commands: 0,
            last_command: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the relay to its initial Off level and announce startup.
    pub fn start(&mut self, relay: &mut impl RelayPort, sink: &mut impl EventSink) {
        self.state = RelayState::Off;
        if let Err(e) = relay.drive(self.state) {
            warn!("Initial relay drive failed: {}", e);
            sink.emit(&AppEvent::ActuationFailed(e));
        }
        sink.emit(&AppEvent::Started(self.state));
        info!("RelayService started, relay {:?}", self.state);
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one poll cycle: check input → read → decode → drive → echo.
    ///
    /// When nothing is pending the relay keeps its last commanded state.
    pub fn poll(
        &mut self,
        serial: &mut impl SerialPort,
        relay: &mut impl RelayPort,
        sink: &mut impl EventSink,
    ) -> PollOutcome {
        self.cycles += 1;

        // 1. Non-blocking availability check
        match serial.available() {
            Ok(0) => return PollOutcome::Idle,
            Ok(_) => {}
            Err(e) => return self.serial_fault(e, sink),
        }

        // 2. Read everything that arrives before the inter-byte timeout
        let (raw, overflowed) = match self.read_command(serial) {
            Ok(read) => read,
            Err(e) => return self.serial_fault(e, sink),
        };

        // 3–4. Normalize and decode (total mapping)
        let cmd = if overflowed {
            debug!("Command exceeded {} bytes, treating as Off", MAX_COMMAND_LEN);
            RelayCommand::Off
        } else {
            command::decode(&raw)
        };
        self.commands += 1;
        self.last_command = Some(cmd);
        sink.emit(&AppEvent::CommandReceived {
            command: cmd,
            len: raw.len(),
        });

        // 5. Actuate
        self.apply(cmd.target_state(), relay, sink);

        // 6. Diagnostic echo
        if self.config.echo {
            if let Err(e) = Self::echo(serial, command::normalize(&raw)) {
                warn!("Echo failed: {}", e);
            }
        }

        PollOutcome::Applied(cmd)
    }

    /// Poll once and emit a [`AppEvent::Status`] every
    /// `status_interval_secs` worth of cycles.
    pub fn tick(
        &mut self,
        serial: &mut impl SerialPort,
        relay: &mut impl RelayPort,
        sink: &mut impl EventSink,
    ) -> PollOutcome {
        let outcome = self.poll(serial, relay, sink);
        if self.cycles % self.config.status_every_cycles() == 0 {
            sink.emit(&AppEvent::Status(self.status()));
        }
        outcome
    }

    /// The device main loop. Never returns.
    pub fn run(
        &mut self,
        serial: &mut impl SerialPort,
        relay: &mut impl RelayPort,
        sink: &mut impl EventSink,
        delay: &mut impl DelayNs,
    ) -> ! {
        loop {
            self.tick(serial, relay, sink);
            delay.delay_ms(self.config.poll_interval_ms);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last commanded relay state.
    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Poll cycles executed since startup.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Build a status snapshot.
    pub fn status(&self) -> RelayStatus {
        RelayStatus {
            state: self.state,
            cycles: self.cycles,
            commands: self.commands,
            last_command: self.last_command,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Accumulate bytes until a read times out with nothing new.
    /// Bytes beyond [`MAX_COMMAND_LEN`] are drained and dropped.
    fn read_command(
        &self,
        serial: &mut impl SerialPort,
    ) -> Result<(Vec<u8, MAX_COMMAND_LEN>, bool), SerialError> {
        let mut raw = Vec::new();
        let mut overflowed = false;
        let mut chunk = [0u8; 16];
        loop {
            let n = serial.read(&mut chunk, self.config.read_timeout_ms)?;
            if n == 0 {
                break;
            }
            for &b in &chunk[..n] {
                if raw.push(b).is_err() {
                    overflowed = true;
                }
            }
        }
        Ok((raw, overflowed))
    }

    fn apply(&mut self, target: RelayState, relay: &mut impl RelayPort, sink: &mut impl EventSink) {
        let prev = self.state;
        self.state = target;
        if let Err(e) = relay.drive(target) {
            warn!("Relay drive to {:?} failed: {}", target, e);
            sink.emit(&AppEvent::ActuationFailed(e));
        }
        if prev != target {
            sink.emit(&AppEvent::StateChanged {
                from: prev,
                to: target,
            });
        }
    }

    fn echo(serial: &mut impl SerialPort, command: &[u8]) -> Result<(), SerialError> {
        serial.write_all(ECHO_PREFIX)?;
        serial.write_all(command)?;
        serial.write_all(ECHO_SUFFIX)
    }

    fn serial_fault(&self, e: SerialError, sink: &mut impl EventSink) -> PollOutcome {
        warn!("Serial fault, relay held {:?}: {}", self.state, e);
        sink.emit(&AppEvent::SerialFault(e));
        PollOutcome::Idle
    }
}
