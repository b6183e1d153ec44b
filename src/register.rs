//! TMP102 register map and bus addresses.

use core::convert::TryFrom;
use core::fmt;

/// Width of every TMP102 register, in bytes.
pub const REGISTER_LEN: usize = 2;

/// Pointer register values. All registers are two bytes, MSB first.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Temperature, read-only.
    Temperature = 0x00,
    /// Configuration, read/write.
    Configuration = 0x01,
    /// T_LOW alert threshold.
    TLow = 0x02,
    /// T_HIGH alert threshold.
    THigh = 0x03,
}

impl Register {
    pub fn ptr(self) -> u8 {
        self as u8
    }
}

/// 7-bit device address, selected by where the ADD0 pin is strapped.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Address {
    /// ADD0 tied to GND
    Gnd = 0x48,
    /// ADD0 tied to V+
    Vcc = 0x49,
    /// ADD0 tied to SDA
    Sda = 0x4A,
    /// ADD0 tied to SCL
    Scl = 0x4B,
}

impl Address {
    pub const ALL: [Address; 4] = [Address::Gnd, Address::Vcc, Address::Sda, Address::Scl];

    pub fn addr(self) -> u8 {
        self as u8
    }
}

impl Default for Address {
    fn default() -> Self {
        Address::Gnd
    }
}

/// A bus address no TMP102 can answer on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidAddress(pub u8);

impl fmt::Display for InvalidAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid TMP102 address {:#04x}", self.0)
    }
}

impl TryFrom<u8> for Address {
    type Error = InvalidAddress;

    fn try_from(value: u8) -> Result<Address, InvalidAddress> {
        match value {
            0x48 => Ok(Address::Gnd),
            0x49 => Ok(Address::Vcc),
            0x4A => Ok(Address::Sda),
            0x4B => Ok(Address::Scl),
            other => Err(InvalidAddress(other)),
        }
    }
}
