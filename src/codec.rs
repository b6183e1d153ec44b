//! Temperature register codec.
//!
//! The temperature, T_LOW and T_HIGH registers share one format: a left
//! aligned two's complement count of 0.0625 °C, 12 bits wide in normal mode
//! and 13 bits wide in extended mode.

use num_traits::Float;

/// Degrees Celsius per LSB.
pub const RESOLUTION: f32 = 0.0625;

/// Lowest threshold the sensor accepts, in °C.
pub const THRESHOLD_MIN: f32 = -55.0;
/// Highest threshold the sensor accepts, in °C.
pub const THRESHOLD_MAX: f32 = 150.0;

/// Register contents of a sensor that did not answer.
pub const NO_READING: [u8; 2] = [0xFF, 0xFF];

/// A temperature as the sensor counts it, in units of [`RESOLUTION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(i16);

impl Temperature {
    pub const fn from_raw(raw: i16) -> Self {
        Temperature(raw)
    }

    /// Signed count of 0.0625 °C steps.
    pub const fn raw(self) -> i16 {
        self.0
    }

    pub fn celsius(self) -> f32 {
        self.0 as f32 * RESOLUTION
    }

    pub fn fahrenheit(self) -> f32 {
        celsius_to_fahrenheit(self.celsius())
    }
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f32) -> f32 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Decode a temperature-format register.
///
/// `extended` must be the EM bit of the configuration register as it is
/// now. Returns `None` for `0xFF, 0xFF`, which is what the bus reads back
/// when nothing drives it.
pub fn decode_temperature(pair: [u8; 2], extended: bool) -> Option<Temperature> {
    if pair == NO_READING {
        return None;
    }
    let [msb, lsb] = pair;

    let bits = if extended {
        let v = ((msb as u16) << 5) | ((lsb as u16) >> 3);
        if v > 0x0FFF {
            v | 0xE000
        } else {
            v
        }
    } else {
        let v = ((msb as u16) << 4) | ((lsb as u16) >> 4);
        if v > 0x07FF {
            v | 0xF000
        } else {
            v
        }
    };

    Some(Temperature(bits as i16))
}

/// Pack a threshold temperature for T_LOW / T_HIGH.
///
/// The input is clamped to [`THRESHOLD_MIN`]..=[`THRESHOLD_MAX`] and then
/// truncated toward zero to a whole number of LSBs, as the sensor's own
/// firmware tooling does. NaN packs as 0 °C.
pub fn encode_threshold(celsius: f32, extended: bool) -> [u8; 2] {
    let celsius = if celsius < THRESHOLD_MIN {
        THRESHOLD_MIN
    } else if celsius > THRESHOLD_MAX {
        THRESHOLD_MAX
    } else {
        celsius
    };
    let raw = Float::trunc(celsius / RESOLUTION) as i16;

    if extended {
        [(raw >> 5) as u8, ((raw & 0x1F) << 3) as u8]
    } else {
        [(raw >> 4) as u8, ((raw & 0x0F) << 4) as u8]
    }
}
