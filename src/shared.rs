//! One TMP102 shared between execution contexts.
//!
//! Configuration setters read the register, change one field and write it
//! back. Two contexts doing that at the same time on one device lose an
//! update, so a shared device has exactly one lock and every access,
//! read or write, runs inside it.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::register::Address;
use crate::tmp102::Tmp102;
use crate::transport::RegisterTransport;

pub struct SharedTmp102<T> {
    inner: Mutex<RefCell<Tmp102<T>>>,
}

impl<T: RegisterTransport> SharedTmp102<T> {
    pub const fn new(device: Tmp102<T>) -> Self {
        SharedTmp102 {
            inner: Mutex::new(RefCell::new(device)),
        }
    }

    pub fn from_transport(transport: T, address: Address) -> Self {
        Self::new(Tmp102::from_transport(transport, address))
    }

    /// Run `f` with exclusive access to the device, inside a critical
    /// section. Keep `f` short: it holds off every other context.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Tmp102<T>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    pub fn into_inner(self) -> Tmp102<T> {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConversionRate, FaultQueue};
    use std::sync::Arc;
    use std::thread;

    /// Register file that stalls between a read and the following write,
    /// widening the window for a lost update.
    struct SlowRegisters {
        config: [u8; 2],
    }

    impl RegisterTransport for SlowRegisters {
        type Error = core::convert::Infallible;

        fn read(&mut self, _address: u8, _register: u8) -> Result<[u8; 2], Self::Error> {
            let config = self.config;
            thread::yield_now();
            Ok(config)
        }

        fn write(&mut self, _address: u8, _register: u8, bytes: [u8; 2]) -> Result<(), Self::Error> {
            self.config = bytes;
            Ok(())
        }

        fn probe(&mut self, _address: u8) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let shared = Arc::new(SharedTmp102::from_transport(
            SlowRegisters { config: [0x60, 0xA0] },
            Address::Gnd,
        ));

        let rate = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..200 {
                    shared.lock(|dev| dev.set_conversion_rate(ConversionRate::Hz8)).unwrap();
                }
            })
        };
        let faults = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..200 {
                    shared.lock(|dev| dev.set_fault_queue(FaultQueue::Six)).unwrap();
                }
            })
        };
        rate.join().unwrap();
        faults.join().unwrap();

        let config = shared.lock(|dev| dev.configuration()).unwrap();
        assert_eq!(config.conversion_rate(), ConversionRate::Hz8);
        assert_eq!(config.fault_queue(), FaultQueue::Six);
        assert_eq!(config.to_bytes(), [0x78, 0xE0]);
    }

    #[test]
    fn test_into_inner() {
        let shared = SharedTmp102::from_transport(SlowRegisters { config: [0x00, 0x00] }, Address::Sda);
        shared.lock(|dev| dev.sleep()).unwrap();
        let dev = shared.into_inner();
        assert_eq!(dev.address(), Address::Sda);
        assert_eq!(dev.release().config, [0x01, 0x00]);
    }
}
