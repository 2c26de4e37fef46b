//! Modem configuration
//!
//! Translates validated bandwidth and spreading factor settings into
//! register field updates. Every field write is a read-modify-write through
//! [`crate::registers`], so bits belonging to other concerns (coding rate,
//! symbol timeout, header mode) are never disturbed — that is the central
//! correctness property of this subsystem.
//!
//! Validation happens before any bus access: an out-of-range parameter
//! leaves the hardware registers untouched.

use crate::device::RadioDevice;
use crate::registers::{
    self, Bandwidth, ModemConfig1, ModemConfig2, PreambleLsb, PreambleMsb, SpreadingFactor,
};
use crate::Error;

/// Preamble length programmed at configuration time.
pub const PREAMBLE_LENGTH: u16 = 0x0008;

/// Modem settings applied to the device at configuration time.
///
/// Both fields are validated at construction. A config is immutable once
/// applied; reconfiguration replaces it wholesale. The device registers
/// remain the authoritative copy of what the modem is actually doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    pub bandwidth: Bandwidth,
    pub spreading_factor: SpreadingFactor,
}

impl RadioConfig {
    /// Builds a config from raw values.
    ///
    /// # Errors
    /// * `Error::OutOfRange` - bandwidth code not in `0..=9` or spreading
    ///   factor not in `6..=12`
    pub fn new(bandwidth_code: u8, spreading_factor: u8) -> Result<Self, Error> {
        Ok(Self {
            bandwidth: Bandwidth::new(bandwidth_code)?,
            spreading_factor: SpreadingFactor::new(spreading_factor)?,
        })
    }
}

/// Sets the channel bandwidth from a raw code.
///
/// On success, read-modify-writes the bandwidth field of modem config 1;
/// the low nibble of the register is preserved bit-for-bit.
///
/// # Errors
/// * `Error::OutOfRange` - code not in `0..=9`; no bus access occurs
pub fn set_bandwidth<D>(device: &mut D, code: u8) -> Result<(), Error>
where
    D: RadioDevice + ?Sized,
{
    let bandwidth = Bandwidth::new(code)?;
    registers::modify_register(device, |reg: ModemConfig1| reg.with_bandwidth(bandwidth));
    Ok(())
}

/// Sets the spreading factor from a raw value.
///
/// On success, read-modify-writes the spreading factor field of modem
/// config 2; the low nibble (including the CRC flag) is preserved
/// bit-for-bit.
///
/// # Errors
/// * `Error::OutOfRange` - value not in `6..=12`; no bus access occurs
pub fn set_spreading_factor<D>(device: &mut D, sf: u8) -> Result<(), Error>
where
    D: RadioDevice + ?Sized,
{
    let sf = SpreadingFactor::new(sf)?;
    registers::modify_register(device, |reg: ModemConfig2| reg.with_spreading_factor(sf));
    Ok(())
}

/// Enables payload CRC.
///
/// Idempotent: if the flag is already set, no write-back is issued.
pub fn enable_crc<D>(device: &mut D)
where
    D: RadioDevice + ?Sized,
{
    registers::modify_register_if_changed(device, |reg: ModemConfig2| reg.with_crc_enabled(true));
}

/// Programs the 16-bit preamble length.
pub fn set_preamble_length<D>(device: &mut D, length: u16)
where
    D: RadioDevice + ?Sized,
{
    let [msb, lsb] = length.to_be_bytes();
    registers::write_register(device, PreambleMsb { value: msb });
    registers::write_register(device, PreambleLsb { value: lsb });
}

/// Applies a validated config to the device.
///
/// Order: bandwidth, spreading factor, CRC enable, preamble length.
/// Infallible at this layer; all range checking happened when the config
/// was built.
pub fn apply<D>(device: &mut D, config: &RadioConfig)
where
    D: RadioDevice + ?Sized,
{
    registers::modify_register(device, |reg: ModemConfig1| {
        reg.with_bandwidth(config.bandwidth)
    });
    registers::modify_register(device, |reg: ModemConfig2| {
        reg.with_spreading_factor(config.spreading_factor)
    });
    enable_crc(device);
    set_preamble_length(device, PREAMBLE_LENGTH);
}
