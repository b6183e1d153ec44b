//! Register access over the bus.
//!
//! The driver never touches the bus directly: it asks a [`RegisterTransport`]
//! for register contents and hands it new ones. Timeouts, retries and bus
//! recovery are the transport's business; its errors reach the caller
//! untouched.

use embedded_hal_02::blocking::i2c as i2c_02;
use embedded_hal_1::i2c::{Error as _, ErrorKind, I2c};

use crate::register::REGISTER_LEN;

/// Reads and writes whole registers of a device.
pub trait RegisterTransport {
    type Error;

    /// Read the `REGISTER_LEN` bytes of `register`, MSB first.
    fn read(&mut self, address: u8, register: u8) -> Result<[u8; REGISTER_LEN], Self::Error>;

    /// Write all `REGISTER_LEN` bytes of `register`, MSB first.
    fn write(
        &mut self,
        address: u8,
        register: u8,
        bytes: [u8; REGISTER_LEN],
    ) -> Result<(), Self::Error>;

    /// Whether anything acknowledges `address`.
    fn probe(&mut self, address: u8) -> Result<bool, Self::Error>;
}

impl<T: RegisterTransport + ?Sized> RegisterTransport for &mut T {
    type Error = T::Error;

    fn read(&mut self, address: u8, register: u8) -> Result<[u8; REGISTER_LEN], T::Error> {
        T::read(self, address, register)
    }

    fn write(&mut self, address: u8, register: u8, bytes: [u8; REGISTER_LEN]) -> Result<(), T::Error> {
        T::write(self, address, register, bytes)
    }

    fn probe(&mut self, address: u8) -> Result<bool, T::Error> {
        T::probe(self, address)
    }
}

/// Transport over an `embedded-hal` 1.0 I²C bus.
pub struct I2cTransport<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> I2cTransport<I2C> {
    pub fn new(i2c: I2C) -> Self {
        I2cTransport { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterTransport for I2cTransport<I2C> {
    type Error = I2C::Error;

    fn read(&mut self, address: u8, register: u8) -> Result<[u8; REGISTER_LEN], I2C::Error> {
        let mut buf = [0u8; REGISTER_LEN];
        self.i2c.write_read(address, &[register], &mut buf)?;
        Ok(buf)
    }

    fn write(&mut self, address: u8, register: u8, bytes: [u8; REGISTER_LEN]) -> Result<(), I2C::Error> {
        self.i2c.write(address, &[register, bytes[0], bytes[1]])
    }

    /// A NACK on the address byte means nobody is there; any other bus
    /// error is returned.
    fn probe(&mut self, address: u8) -> Result<bool, I2C::Error> {
        match self.i2c.write(address, &[]) {
            Ok(()) => Ok(true),
            Err(e) => match e.kind() {
                ErrorKind::NoAcknowledge(_) => Ok(false),
                _ => Err(e),
            },
        }
    }
}

/// Transport over an `embedded-hal` 0.2 blocking I²C bus.
pub struct LegacyI2cTransport<I2C> {
    i2c: I2C,
}

impl<I2C, E> LegacyI2cTransport<I2C>
where
    I2C: i2c_02::Write<Error = E> + i2c_02::WriteRead<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        LegacyI2cTransport { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterTransport for LegacyI2cTransport<I2C>
where
    I2C: i2c_02::Write<Error = E> + i2c_02::WriteRead<Error = E>,
{
    type Error = E;

    fn read(&mut self, address: u8, register: u8) -> Result<[u8; REGISTER_LEN], E> {
        let mut buf = [0u8; REGISTER_LEN];
        self.i2c.write_read(address, &[register], &mut buf)?;
        Ok(buf)
    }

    fn write(&mut self, address: u8, register: u8, bytes: [u8; REGISTER_LEN]) -> Result<(), E> {
        self.i2c.write(address, &[register, bytes[0], bytes[1]])
    }

    /// 0.2 errors carry no kind, so every failure counts as absent.
    fn probe(&mut self, address: u8) -> Result<bool, E> {
        Ok(self.i2c.write(address, &[]).is_ok())
    }
}
