//! Command link to a single relay device.

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use crate::app::command::{RelayCommand, RelayState};

use super::LinkError;

/// Longest reply line kept by [`RelayLink::recv_line`].
const MAX_LINE: usize = 256;

/// Lines tolerated ahead of the echo before an exchange gives up on it.
const MAX_SKIPPED_LINES: usize = 32;

/// The diagnostic echo the device answers `command` with.
pub fn echo_line(command: RelayCommand) -> String {
    format!("Received: [{}]", String::from_utf8_lossy(command.as_wire()))
}

/// One command sent and the device's echo of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub sent: RelayCommand,
    /// The echo line; empty when no echo arrived before the timeout.
    pub reply: String,
    /// Lines read ahead of the echo: console output or stale echoes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl Exchange {
    /// Whether the reply is the device's diagnostic echo of `sent`.
    pub fn echo_matches(&self) -> bool {
        self.reply == echo_line(self.sent)
    }
}

/// Host side of the serial relay protocol.
///
/// Tracks the last state it commanded so [`toggle`](Self::toggle) can flip
/// it; the device itself has no notion of toggling.
pub struct RelayLink<T> {
    io: T,
    state: RelayState,
}

impl<T: Read + Write> RelayLink<T> {
    pub fn new(io: T) -> Self {
        Self {
            io,
            state: RelayState::Off,
        }
    }

    /// Write the command bytes. No terminator is appended; the device's
    /// read timeout delimits the command.
    pub fn send(&mut self, command: RelayCommand) -> Result<(), LinkError> {
        debug!("Sending: {:?}", command);
        self.io.write_all(command.as_wire())?;
        self.io.flush()?;
        Ok(())
    }

    /// Read one line, stopping at `\n` or when the port times out.
    /// Returns the trimmed text, empty if nothing arrived.
    pub fn recv_line(&mut self) -> Result<String, LinkError> {
        Ok(self.read_line()?.unwrap_or_default())
    }

    /// Command `state` and wait for the device's echo of it.
    ///
    /// Other lines arriving first (the device console shares the UART, or
    /// an echo that missed the previous exchange) are skipped and kept in
    /// [`Exchange::skipped`].
    pub fn set(&mut self, state: RelayState) -> Result<Exchange, LinkError> {
        let sent = RelayCommand::from(state);
        self.send(sent)?;
        self.state = state;
        let expected = echo_line(sent);
        let mut skipped = Vec::new();
        let mut reply = String::new();
        while let Some(line) = self.read_line()? {
            if line == expected {
                reply = line;
                break;
            }
            debug!("Skipping line: {:?}", line);
            skipped.push(line);
            if skipped.len() == MAX_SKIPPED_LINES {
                break;
            }
        }
        info!("Sent {:?}, reply {:?}", sent, reply);
        Ok(Exchange {
            sent,
            reply,
            skipped,
        })
    }

    /// Flip the last commanded state. The first toggle switches On.
    pub fn toggle(&mut self) -> Result<Exchange, LinkError> {
        self.set(self.state.toggled())
    }

    /// Switch On then Off `count` times. Each exchange is handed to
    /// `on_exchange` as soon as it completes, then `sleep(period)` runs.
    /// An error from either side stops the cycle.
    pub fn cycle<E: From<LinkError>>(
        &mut self,
        count: u32,
        period: Duration,
        mut sleep: impl FnMut(Duration),
        mut on_exchange: impl FnMut(Exchange) -> Result<(), E>,
    ) -> Result<(), E> {
        for _ in 0..count {
            for state in [RelayState::On, RelayState::Off] {
                on_exchange(self.set(state)?)?;
                sleep(period);
            }
        }
        Ok(())
    }

    /// Last state this link commanded.
    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn into_inner(self) -> T {
        self.io
    }

    /// `None` when the port timed out before any byte of the line.
    fn read_line(&mut self) -> Result<Option<String>, LinkError> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        let mut got_any = false;
        while line.len() < MAX_LINE {
            match self.io.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    got_any = true;
                    if byte[0] == b'\n' {
                        break;
                    }
                    line.push(byte[0]);
                }
                Err(e) if e.kind() == ErrorKind::TimedOut => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        if !got_any {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_owned()))
    }
}
