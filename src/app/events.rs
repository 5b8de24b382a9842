//! Outbound application events.
//!
//! The [`RelayService`](super::service::RelayService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them.

use crate::error::{GpioError, SerialError};

use super::command::{RelayCommand, RelayState};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started and driven the initial level.
    Started(RelayState),

    /// A command was read and decoded. `len` is the raw byte count.
    CommandReceived { command: RelayCommand, len: usize },

    /// The relay moved between states.
    StateChanged { from: RelayState, to: RelayState },

    /// Periodic status snapshot.
    Status(RelayStatus),

    /// Reading the UART failed; the relay was left untouched.
    SerialFault(SerialError),

    /// Writing the relay pin failed.
    ActuationFailed(GpioError),
}

/// A point-in-time status snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayStatus {
    pub state: RelayState,
    pub cycles: u64,
    pub commands: u64,
    pub last_command: Option<RelayCommand>,
}
