//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements  | Connects to                     |
//! |-------------|-------------|---------------------------------|
//! | `log_sink`  | EventSink   | `log` facade (serial / stderr)  |
//! | `relay_pin` | RelayPort   | any `embedded-hal` OutputPin    |
//! | `uart`      | SerialPort  | ESP-IDF UART driver (espidf)    |

pub mod log_sink;
pub mod relay_pin;
#[cfg(feature = "espidf")]
pub mod uart;
