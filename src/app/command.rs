//! Inbound relay commands and their decoder.
//!
//! The wire protocol is a single ASCII token: exactly `1` energises the
//! relay, anything else (including an empty read) releases it. The mapping
//! is total, so malformed or partial input always resolves to
//! [`RelayCommand::Off`].

use embedded_hal::digital::PinState;
use serde::{Deserialize, Serialize};

/// Maximum bytes kept from one serial read. Longer input is drained and
/// decodes to [`RelayCommand::Off`].
pub const MAX_COMMAND_LEN: usize = 64;

/// Logical relay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RelayState {
    #[default]
    Off,
    On,
}

impl RelayState {
    /// Output level for this state. Active-low boards invert it.
    pub fn pin_state(self, active_low: bool) -> PinState {
        match (self, active_low) {
            (Self::On, false) | (Self::Off, true) => PinState::High,
            (Self::Off, false) | (Self::On, true) => PinState::Low,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

/// A decoded serial command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayCommand {
    On,
    Off,
}

impl RelayCommand {
    /// The relay state this command asks for.
    pub fn target_state(self) -> RelayState {
        match self {
            Self::On => RelayState::On,
            Self::Off => RelayState::Off,
        }
    }

    /// Canonical bytes a host sends for this command.
    pub fn as_wire(self) -> &'static [u8] {
        match self {
            Self::On => b"1",
            Self::Off => b"0",
        }
    }
}

impl From<RelayState> for RelayCommand {
    fn from(state: RelayState) -> Self {
        match state {
            RelayState::On => Self::On,
            RelayState::Off => Self::Off,
        }
    }
}

/// Strip trailing line terminators (`\n`, `\r`). Nothing else is trimmed.
pub fn normalize(raw: &[u8]) -> &[u8] {
    let end = raw
        .iter()
        .rposition(|&b| b != b'\n' && b != b'\r')
        .map_or(0, |i| i + 1);
    &raw[..end]
}

/// Decode a raw read into a command. Exact match on `1` after
/// [`normalize`]; everything else is `Off`.
pub fn decode(raw: &[u8]) -> RelayCommand {
    if normalize(raw) == b"1" {
        RelayCommand::On
    } else {
        RelayCommand::Off
    }
}
