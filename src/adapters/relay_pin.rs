//! Relay output adapter — bridges an `embedded-hal` output pin to the
//! [`RelayPort`] trait.
//!
//! Any `OutputPin` works: `esp_idf_hal::gpio::PinDriver<_, Output>` on the
//! device, a mock pin on the host.

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::command::RelayState;
use crate::app::ports::RelayPort;
use crate::error::GpioError;

/// Relay coil driven by a single digital output.
pub struct PinRelay<P> {
    pin: P,
    active_low: bool,
    level: Option<PinState>,
}

impl<P: OutputPin> PinRelay<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            level: None,
        }
    }

    /// Last level successfully written, `None` before the first write.
    pub fn level(&self) -> Option<PinState> {
        self.level
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> RelayPort for PinRelay<P> {
    fn drive(&mut self, state: RelayState) -> Result<(), GpioError> {
        let level = state.pin_state(self.active_low);
        self.pin
            .set_state(level)
            .map_err(|_| GpioError::WriteFailed)?;
        self.level = Some(level);
        Ok(())
    }
}
