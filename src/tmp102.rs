//! TMP102 digital temperature sensor
//!
//! - Range: -55 to +150 °C (extended mode), -55 to +128 °C (normal mode)
//! - Resolution: 0.0625 °C
//! - Address(7bit): 0x48, 0x49, 0x4A or 0x4B

use embedded_hal_02::blocking::i2c as i2c_02;
use embedded_hal_1::i2c::I2c;

use crate::codec::{self, Temperature};
use crate::config::{AlertMode, Configuration, ConversionRate, FaultQueue, Polarity};
use crate::register::{Address, Register, REGISTER_LEN};
use crate::transport::{I2cTransport, LegacyI2cTransport, RegisterTransport};

/// A TMP102 behind some register transport.
///
/// Every operation reads the registers it needs right then; nothing about
/// the device is cached here. Configuration setters are read-modify-write
/// sequences, so all of them for one device must go through one `Tmp102`
/// (or one [`SharedTmp102`](crate::SharedTmp102)).
#[derive(Debug)]
pub struct Tmp102<T> {
    transport: T,
    address: Address,
}

impl<I2C: I2c> Tmp102<I2cTransport<I2C>> {
    /// Create device driver instance on an `embedded-hal` 1.0 bus.
    pub fn new(i2c: I2C, address: Address) -> Self {
        Self::from_transport(I2cTransport::new(i2c), address)
    }
}

impl<I2C, E> Tmp102<LegacyI2cTransport<I2C>>
where
    I2C: i2c_02::Write<Error = E> + i2c_02::WriteRead<Error = E>,
{
    /// Create device driver instance on an `embedded-hal` 0.2 bus.
    pub fn new_legacy(i2c: I2C, address: Address) -> Self {
        Self::from_transport(LegacyI2cTransport::new(i2c), address)
    }
}

impl<T: RegisterTransport> Tmp102<T> {
    pub fn from_transport(transport: T, address: Address) -> Self {
        Tmp102 { transport, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn release(self) -> T {
        self.transport
    }

    /// Whether the sensor acknowledges its address.
    pub fn is_connected(&mut self) -> Result<bool, T::Error> {
        self.transport.probe(self.address.addr())
    }

    /// Gate for first use: `Ok(false)` when no device answers.
    pub fn init(&mut self) -> Result<bool, T::Error> {
        let connected = self.is_connected()?;
        if !connected {
            debug!("tmp102: no device at {=u8:#04x}", self.address.addr());
        }
        Ok(connected)
    }

    pub fn read_register(&mut self, register: Register) -> Result<[u8; REGISTER_LEN], T::Error> {
        self.transport.read(self.address.addr(), register.ptr())
    }

    fn write_register(&mut self, register: Register, bytes: [u8; REGISTER_LEN]) -> Result<(), T::Error> {
        trace!(
            "tmp102: write {} <- [{=u8:#04x}, {=u8:#04x}]",
            register,
            bytes[0],
            bytes[1]
        );
        self.transport.write(self.address.addr(), register.ptr(), bytes)
    }

    pub fn configuration(&mut self) -> Result<Configuration, T::Error> {
        self.read_register(Register::Configuration).map(Configuration::from_bytes)
    }

    /// Overwrite the whole configuration register.
    pub fn set_configuration(&mut self, config: Configuration) -> Result<(), T::Error> {
        self.write_register(Register::Configuration, config.to_bytes())
    }

    /// Read the configuration, apply `f`, write both bytes back.
    pub fn update_configuration<F>(&mut self, f: F) -> Result<(), T::Error>
    where
        F: FnOnce(Configuration) -> Configuration,
    {
        let config = self.configuration()?;
        self.set_configuration(f(config))
    }

    fn read_temperature_format(&mut self, register: Register) -> Result<Option<Temperature>, T::Error> {
        let extended = self.configuration()?.extended_mode();
        let raw = self.read_register(register)?;
        let value = codec::decode_temperature(raw, extended);
        if value.is_none() {
            debug!("tmp102: {} reads all ones", register);
        }
        Ok(value)
    }

    /// Current temperature, or `None` if the register reads `0xFF, 0xFF`.
    pub fn read_temperature(&mut self) -> Result<Option<Temperature>, T::Error> {
        self.read_temperature_format(Register::Temperature)
    }

    pub fn read_celsius(&mut self) -> Result<Option<f32>, T::Error> {
        Ok(self.read_temperature()?.map(Temperature::celsius))
    }

    pub fn read_fahrenheit(&mut self) -> Result<Option<f32>, T::Error> {
        Ok(self.read_temperature()?.map(Temperature::fahrenheit))
    }

    /// T_LOW as currently programmed.
    pub fn low_threshold(&mut self) -> Result<Option<Temperature>, T::Error> {
        self.read_temperature_format(Register::TLow)
    }

    /// T_HIGH as currently programmed.
    pub fn high_threshold(&mut self) -> Result<Option<Temperature>, T::Error> {
        self.read_temperature_format(Register::THigh)
    }

    fn write_threshold(&mut self, register: Register, celsius: f32) -> Result<(), T::Error> {
        let extended = self.configuration()?.extended_mode();
        self.write_register(register, codec::encode_threshold(celsius, extended))
    }

    /// Program T_LOW. Values outside -55..=150 °C are clamped.
    pub fn set_low_threshold(&mut self, celsius: f32) -> Result<(), T::Error> {
        self.write_threshold(Register::TLow, celsius)
    }

    /// Program T_HIGH. Values outside -55..=150 °C are clamped.
    pub fn set_high_threshold(&mut self, celsius: f32) -> Result<(), T::Error> {
        self.write_threshold(Register::THigh, celsius)
    }

    pub fn set_low_threshold_f(&mut self, fahrenheit: f32) -> Result<(), T::Error> {
        self.set_low_threshold(codec::fahrenheit_to_celsius(fahrenheit))
    }

    pub fn set_high_threshold_f(&mut self, fahrenheit: f32) -> Result<(), T::Error> {
        self.set_high_threshold(codec::fahrenheit_to_celsius(fahrenheit))
    }

    /// Enter shutdown, the low power state.
    pub fn sleep(&mut self) -> Result<(), T::Error> {
        self.update_configuration(|c| c.with_shutdown(true))
    }

    /// Leave shutdown and resume continuous conversion.
    pub fn wakeup(&mut self) -> Result<(), T::Error> {
        self.update_configuration(|c| c.with_shutdown(false))
    }

    pub fn is_sleeping(&mut self) -> Result<bool, T::Error> {
        Ok(self.configuration()?.shutdown())
    }

    pub fn set_alert_mode(&mut self, mode: AlertMode) -> Result<(), T::Error> {
        self.update_configuration(|c| c.with_alert_mode(mode))
    }

    pub fn alert_mode(&mut self) -> Result<AlertMode, T::Error> {
        Ok(self.configuration()?.alert_mode())
    }

    pub fn set_alert_polarity(&mut self, polarity: Polarity) -> Result<(), T::Error> {
        self.update_configuration(|c| c.with_polarity(polarity))
    }

    pub fn alert_polarity(&mut self) -> Result<Polarity, T::Error> {
        Ok(self.configuration()?.polarity())
    }

    pub fn set_fault_queue(&mut self, faults: FaultQueue) -> Result<(), T::Error> {
        self.update_configuration(|c| c.with_fault_queue(faults))
    }

    pub fn fault_queue(&mut self) -> Result<FaultQueue, T::Error> {
        Ok(self.configuration()?.fault_queue())
    }

    pub fn set_conversion_rate(&mut self, rate: ConversionRate) -> Result<(), T::Error> {
        self.update_configuration(|c| c.with_conversion_rate(rate))
    }

    pub fn conversion_rate(&mut self) -> Result<ConversionRate, T::Error> {
        Ok(self.configuration()?.conversion_rate())
    }

    /// Select the 13-bit (`true`) or 12-bit temperature format.
    pub fn set_extended_mode(&mut self, extended: bool) -> Result<(), T::Error> {
        self.update_configuration(|c| c.with_extended_mode(extended))
    }

    pub fn extended_mode(&mut self) -> Result<bool, T::Error> {
        Ok(self.configuration()?.extended_mode())
    }

    /// State of the AL bit. In thermostat mode reading it clears the alert.
    pub fn alert(&mut self) -> Result<bool, T::Error> {
        Ok(self.configuration()?.alert())
    }

    /// Start a single conversion. Meant for use while in shutdown.
    pub fn trigger_one_shot(&mut self) -> Result<(), T::Error> {
        self.update_configuration(|c| c.with_one_shot())
    }

    /// `true` once the conversion started by [`trigger_one_shot`] is done.
    /// Only reads.
    ///
    /// [`trigger_one_shot`]: Tmp102::trigger_one_shot
    pub fn one_shot_status(&mut self) -> Result<bool, T::Error> {
        Ok(self.configuration()?.one_shot())
    }

    /// Poll for the result of a one-shot conversion.
    ///
    /// Returns `WouldBlock` until the OS bit reads back 1, then the
    /// temperature. Use with `nb::block!` or from a timer tick.
    pub fn read_one_shot(&mut self) -> nb::Result<Option<Temperature>, T::Error> {
        if !self.one_shot_status()? {
            return Err(nb::Error::WouldBlock);
        }
        Ok(self.read_temperature()?)
    }
}
