//! Load switch and status indicator control
//!
//! The radio module is fed through an external load switch so it can be cut
//! off entirely between transmissions; a status LED signals successful
//! sends. Both are plain digital output lines with no state of their own:
//! every call here is idempotent and side-effect-only.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::Error;

/// Driver for the load switch and the status indicator.
///
/// The switch line is high exactly while the radio is transmitting; the
/// indicator pulses after a successful send and is held low otherwise.
pub struct PowerGate<SW, LED> {
    switch: SW,
    indicator: LED,
}

impl<SW, LED> PowerGate<SW, LED>
where
    SW: OutputPin,
    LED: OutputPin,
{
    /// Creates a power gate over the two output lines.
    pub fn new(switch: SW, indicator: LED) -> Self {
        Self { switch, indicator }
    }

    /// Closes the load switch, powering the radio module.
    ///
    /// # Errors
    /// * `Error::Pin` - the output line could not be driven
    pub fn energize(&mut self) -> Result<(), Error> {
        self.switch.set_high().map_err(|_| Error::Pin)
    }

    /// Opens the load switch, cutting power to the radio module.
    ///
    /// # Errors
    /// * `Error::Pin` - the output line could not be driven
    pub fn deenergize(&mut self) -> Result<(), Error> {
        self.switch.set_low().map_err(|_| Error::Pin)
    }

    /// Flashes the indicator for `duration_ms`, blocking for the duration.
    ///
    /// # Errors
    /// * `Error::Pin` - the output line could not be driven
    pub fn pulse_indicator<D: DelayNs>(
        &mut self,
        delay: &mut D,
        duration_ms: u32,
    ) -> Result<(), Error> {
        self.indicator.set_high().map_err(|_| Error::Pin)?;
        delay.delay_ms(duration_ms);
        self.indicator.set_low().map_err(|_| Error::Pin)
    }

    /// Extinguishes the indicator.
    ///
    /// # Errors
    /// * `Error::Pin` - the output line could not be driven
    pub fn indicator_off(&mut self) -> Result<(), Error> {
        self.indicator.set_low().map_err(|_| Error::Pin)
    }

    /// Releases the underlying output lines.
    ///
    /// This method consumes the gate and returns the wrapped pins.
    pub fn free(self) -> (SW, LED) {
        (self.switch, self.indicator)
    }
}
