//! LoRa modem configuration registers
//!
//! This module contains the registers the core configures at run time:
//! - Modem config 1: channel bandwidth (plus coding rate / header mode,
//!   which the core never touches)
//! - Modem config 2: spreading factor, payload CRC enable
//! - Preamble length
//!
//! Fields that share a register byte are exposed as typed accessors over the
//! raw value, so a caller can only change the field it owns; the sibling
//! bits always round-trip bit-for-bit.

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::Error;

/// Field bit patterns for each bandwidth code, indexed by code.
///
/// The bandwidth field occupies the high nibble of modem config 1; code `c`
/// maps to `c << 4`.
const BANDWIDTH_PATTERNS: [u8; 10] = [
    0x00, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80, 0x90,
];

/// Validated channel bandwidth code.
///
/// Codes index the fixed table of channel bandwidths supported by the modem,
/// from 7.8kHz (code 0) up to 500kHz (code 9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bandwidth(u8);

impl Bandwidth {
    /// Validates a raw bandwidth code.
    ///
    /// # Errors
    /// * `Error::OutOfRange` - code is not in `0..=9`
    pub fn new(code: u8) -> Result<Self, Error> {
        match code {
            0..=9 => Ok(Self(code)),
            _ => Err(Error::OutOfRange),
        }
    }

    /// The raw bandwidth code.
    pub fn code(self) -> u8 {
        self.0
    }

    fn field_bits(self) -> u8 {
        BANDWIDTH_PATTERNS[self.0 as usize]
    }
}

/// Validated spreading factor.
///
/// The modem supports SF6 through SF12. Higher values trade data rate for
/// range and robustness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpreadingFactor(u8);

impl SpreadingFactor {
    /// Validates a raw spreading factor.
    ///
    /// # Errors
    /// * `Error::OutOfRange` - value is not in `6..=12`
    pub fn new(sf: u8) -> Result<Self, Error> {
        match sf {
            6..=12 => Ok(Self(sf)),
            _ => Err(Error::OutOfRange),
        }
    }

    /// The raw spreading factor value.
    pub fn value(self) -> u8 {
        self.0
    }

    fn field_bits(self) -> u8 {
        self.0 << 4
    }
}

bitflags! {
    /// Flag bits in the low nibble of modem config 2.
    ///
    /// The remaining low-order bits hold the symbol timeout MSBs; they are
    /// preserved, never interpreted, by this crate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ModemConfig2Flags: u8 {
        /// When set, payload CRC is generated on TX and checked on RX
        const RX_PAYLOAD_CRC_ON = 1 << 2;
        /// Continuous transmit mode
        const TX_CONTINUOUS_MODE = 1 << 3;
    }
}

/// Modem config 1 register (address: 0x1D)
///
/// The high nibble selects the channel bandwidth; the low nibble carries the
/// coding rate and implicit-header flag.
///
/// # Important Notes
/// - This crate owns only the bandwidth field. The low nibble must pass
///   through any update bit-for-bit.
#[register(0x1Du8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModemConfig1 {
    bits: u8,
}

impl ModemConfig1 {
    /// The raw register byte.
    pub fn bits(self) -> u8 {
        self.bits
    }

    /// The bandwidth code currently in the bandwidth field.
    pub fn bandwidth(self) -> u8 {
        self.bits >> 4
    }

    /// Replaces the bandwidth field, preserving the low nibble.
    pub fn with_bandwidth(self, bandwidth: Bandwidth) -> Self {
        Self {
            bits: (self.bits & 0x0F) | bandwidth.field_bits(),
        }
    }
}

impl Default for ModemConfig1 {
    fn default() -> Self {
        // POR value: 125kHz bandwidth, CR 4/5, explicit header
        Self { bits: 0x72 }
    }
}

/// Modem config 2 register (address: 0x1E)
///
/// The high nibble selects the spreading factor; the low nibble carries the
/// CRC-enable and TX-continuous flags plus the symbol timeout MSBs.
///
/// # Important Notes
/// - This crate owns only the spreading factor field and the CRC-enable
///   flag. All other bits must pass through any update bit-for-bit.
#[register(0x1Eu8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModemConfig2 {
    bits: u8,
}

impl ModemConfig2 {
    /// The raw register byte.
    pub fn bits(self) -> u8 {
        self.bits
    }

    /// The spreading factor currently in the spreading factor field.
    pub fn spreading_factor(self) -> u8 {
        self.bits >> 4
    }

    /// Replaces the spreading factor field, preserving the low nibble.
    pub fn with_spreading_factor(self, sf: SpreadingFactor) -> Self {
        Self {
            bits: (self.bits & 0x0F) | sf.field_bits(),
        }
    }

    /// The flag bits of the low nibble.
    pub fn flags(self) -> ModemConfig2Flags {
        ModemConfig2Flags::from_bits_truncate(self.bits)
    }

    /// Whether payload CRC is enabled.
    pub fn crc_enabled(self) -> bool {
        self.flags().contains(ModemConfig2Flags::RX_PAYLOAD_CRC_ON)
    }

    /// Sets or clears the CRC-enable flag, preserving all other bits.
    pub fn with_crc_enabled(self, enabled: bool) -> Self {
        let flag = ModemConfig2Flags::RX_PAYLOAD_CRC_ON.bits();
        Self {
            bits: if enabled {
                self.bits | flag
            } else {
                self.bits & !flag
            },
        }
    }
}

impl Default for ModemConfig2 {
    fn default() -> Self {
        // POR value: SF7, CRC disabled
        Self { bits: 0x70 }
    }
}

/// Preamble length MSB register (address: 0x20)
#[register(0x20u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PreambleMsb {
    /// High byte of the 16-bit preamble length
    /// Default: 0x00
    pub value: u8,
}

impl Default for PreambleMsb {
    fn default() -> Self {
        Self { value: 0x00 }
    }
}

/// Preamble length LSB register (address: 0x21)
#[register(0x21u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PreambleLsb {
    /// Low byte of the 16-bit preamble length
    /// Default: 0x08
    pub value: u8,
}

impl Default for PreambleLsb {
    fn default() -> Self {
        Self { value: 0x08 }
    }
}

impl FromByteArray for ModemConfig1 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { bits: bytes[0] })
    }
}

impl ToByteArray for ModemConfig1 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits])
    }
}

impl FromByteArray for ModemConfig2 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { bits: bytes[0] })
    }
}

impl ToByteArray for ModemConfig2 {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits])
    }
}

impl FromByteArray for PreambleMsb {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

impl ToByteArray for PreambleMsb {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.value])
    }
}

impl FromByteArray for PreambleLsb {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

impl ToByteArray for PreambleLsb {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.value])
    }
}
