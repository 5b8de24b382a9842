//! Relay system configuration parameters
//!
//! All tunable parameters for the serial relay. Values are compiled in;
//! there is no persistent store.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    // --- Serial ---
    /// Command UART bit rate
    pub baud_rate: u32,
    /// Inter-byte timeout (milliseconds); a read that sees no new byte for
    /// this long ends the current command
    pub read_timeout_ms: u32,
    /// Echo `Received: [<command>]` back over the UART
    pub echo: bool,

    // --- Relay ---
    /// Relay board energises on LOW instead of HIGH
    pub active_low: bool,

    // --- Timing ---
    /// Yield between poll cycles (milliseconds)
    pub poll_interval_ms: u32,
    /// Status report interval (seconds)
    pub status_interval_secs: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            // Serial
            baud_rate: 115_200,
            read_timeout_ms: 20,
            echo: true,

            // Relay
            active_low: false,

            // Timing
            poll_interval_ms: 10,     // 100 Hz
            status_interval_secs: 60, // 1/min
        }
    }
}

impl RelayConfig {
    /// Reject values the poll loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baud_rate == 0 {
            return Err(ConfigError::Invalid("baud_rate must be non-zero"));
        }
        if !(1..=1000).contains(&self.read_timeout_ms) {
            return Err(ConfigError::Invalid("read_timeout_ms must be 1..=1000"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be non-zero"));
        }
        if self.status_interval_secs == 0 {
            return Err(ConfigError::Invalid("status_interval_secs must be non-zero"));
        }
        Ok(())
    }

    /// Number of poll cycles between two status reports. Never zero, even
    /// for a config that fails [`validate`](Self::validate).
    pub fn status_every_cycles(&self) -> u64 {
        let poll_ms = u64::from(self.poll_interval_ms.max(1));
        (u64::from(self.status_interval_secs) * 1000 / poll_ms).max(1)
    }
}

/// Errors from [`RelayConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation; the message names it.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Invalid(msg) => Self::Config(msg),
        }
    }
}
