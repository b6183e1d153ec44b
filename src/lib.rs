//! Platform-agnostic driver for the TI TMP102 digital temperature sensor.
//!
//! The crate is split in two halves:
//!
//! - a pure register codec ([`codec`], [`config`], [`register`]) that turns
//!   raw register bytes into temperatures and configuration fields and back;
//! - a thin driver ([`Tmp102`]) that moves those bytes over a
//!   [`RegisterTransport`], with adapters for `embedded-hal` 1.0 and 0.2 I²C.
//!
//! ```ignore
//! let mut sensor = Tmp102::new(i2c, Address::Gnd);
//! sensor.set_extended_mode(true)?;
//! if let Some(t) = sensor.read_temperature()? {
//!     let _ = t.celsius();
//! }
//! ```
#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod codec;
pub mod config;
pub mod register;
pub mod shared;
pub mod tmp102;
pub mod transport;

pub use crate::codec::{decode_temperature, encode_threshold, Temperature};
pub use crate::config::{AlertMode, Configuration, ConversionRate, FaultQueue, Polarity};
pub use crate::register::{Address, InvalidAddress, Register};
pub use crate::shared::SharedTmp102;
pub use crate::tmp102::Tmp102;
pub use crate::transport::{I2cTransport, LegacyI2cTransport, RegisterTransport};
