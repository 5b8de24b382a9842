//! GPIO / peripheral pin assignments for the relay board.
//!
//! Single source of truth — the firmware binary references this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Relay
// ---------------------------------------------------------------------------

/// Digital output driving the relay coil transistor.
/// HIGH = relay energised (unless the board is active-low, see
/// [`RelayConfig::active_low`](crate::config::RelayConfig::active_low)).
pub const RELAY_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Command UART (UART0, shared with the USB-serial bridge)
// ---------------------------------------------------------------------------

/// UART0 TX on ESP32-S3.
pub const UART_TX_GPIO: i32 = 43;
/// UART0 RX on ESP32-S3.
pub const UART_RX_GPIO: i32 = 44;
