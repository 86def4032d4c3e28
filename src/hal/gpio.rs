use embedded_hal::digital::v2::OutputPin;

use crate::error::{Error, Result};

/// On/off output such as the board's PC13 LED.
///
/// The driven level is tracked in software so `toggle` and `is_on` work on
/// any `OutputPin`, including active-low pins wrapped by the board layer.
#[derive(Debug)]
pub struct Led<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> Led<P> {
    /// Wraps `pin` and drives it off.
    pub fn new(pin: P) -> Result<Self> {
        let mut led = Self { pin, on: true };
        led.set(false)?;
        Ok(led)
    }

    pub fn set(&mut self, on: bool) -> Result<()> {
        if on {
            self.pin.set_high().map_err(|_| Error::Pin)?;
        } else {
            self.pin.set_low().map_err(|_| Error::Pin)?;
        }
        self.on = on;
        Ok(())
    }

    #[inline]
    pub fn toggle(&mut self) -> Result<()> {
        self.set(!self.on)
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    pub fn free(self) -> P {
        self.pin
    }
}
