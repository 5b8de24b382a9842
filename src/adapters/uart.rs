//! ESP-IDF UART adapter.
//!
//! Implements [`SerialPort`] over `esp_idf_hal::uart::UartDriver`. The
//! driver's RX ring buffer plays the role of the serial input buffer;
//! reads block for at most the configured inter-byte timeout.

use esp_idf_hal::delay::TickType;
use esp_idf_hal::uart::UartDriver;

use crate::app::ports::SerialPort;
use crate::error::SerialError;

/// Command UART backed by the ESP-IDF UART driver.
pub struct EspUart<'d> {
    driver: UartDriver<'d>,
}

impl<'d> EspUart<'d> {
    pub fn new(driver: UartDriver<'d>) -> Self {
        Self { driver }
    }
}

impl SerialPort for EspUart<'_> {
    fn available(&mut self) -> Result<usize, SerialError> {
        self.driver
            .remaining_read()
            .map_err(|_| SerialError::StatusFailed)
    }

    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, SerialError> {
        let ticks = TickType::new_millis(u64::from(timeout_ms)).ticks();
        self.driver
            .read(buf, ticks)
            .map_err(|_| SerialError::ReadFailed)
    }

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), SerialError> {
        while !bytes.is_empty() {
            let n = self
                .driver
                .write(bytes)
                .map_err(|_| SerialError::WriteFailed)?;
            if n == 0 {
                return Err(SerialError::WriteFailed);
            }
            bytes = &bytes[n..];
        }
        Ok(())
    }
}
