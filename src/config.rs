//! Configuration register bit fields.
//!
//! ```text
//! byte 0:  OS  R1  R0  F1  F0  POL  TM  SD
//! byte 1:  CR1 CR0 AL  EM  0   0    0   0
//! ```
//!
//! R1/R0 (converter resolution) are read-only and always read back `11`;
//! they are kept as-is by every update.

/// Replace the bits under `$mask` with `$data` shifted to `$pos`.
macro_rules! set_bits {
    ($reg_data:expr, $mask:expr, $pos:expr, $data:expr) => {
        ($reg_data & !$mask) | ((($data) & ($mask >> $pos)) << $pos)
    };
}

macro_rules! get_bits {
    ($reg_data:expr, $mask:expr, $pos:expr) => {
        ($reg_data & $mask) >> $pos
    };
}

// byte 0
const SD_MSK: u8 = 0x01;
const SD_POS: u8 = 0;
const TM_MSK: u8 = 0x02;
const TM_POS: u8 = 1;
const POL_MSK: u8 = 0x04;
const POL_POS: u8 = 2;
const FQ_MSK: u8 = 0x18;
const FQ_POS: u8 = 3;
const OS_MSK: u8 = 0x80;
const OS_POS: u8 = 7;

// byte 1
const EM_MSK: u8 = 0x10;
const EM_POS: u8 = 4;
const AL_MSK: u8 = 0x20;
const AL_POS: u8 = 5;
const CR_MSK: u8 = 0xC0;
const CR_POS: u8 = 6;

/// Alert output behaviour (TM bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertMode {
    /// Active from T > T_HIGH until T < T_LOW.
    Comparator = 0,
    /// Active from T > T_HIGH until the next read of any register.
    Thermostat = 1,
}

impl From<u8> for AlertMode {
    fn from(bits: u8) -> Self {
        match bits & 0b1 {
            0 => AlertMode::Comparator,
            _ => AlertMode::Thermostat,
        }
    }
}

/// Alert pin polarity (POL bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveLow = 0,
    ActiveHigh = 1,
}

impl From<u8> for Polarity {
    fn from(bits: u8) -> Self {
        match bits & 0b1 {
            0 => Polarity::ActiveLow,
            _ => Polarity::ActiveHigh,
        }
    }
}

/// Consecutive out-of-limit conversions needed to assert the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultQueue {
    One = 0b00,
    Two = 0b01,
    Four = 0b10,
    Six = 0b11,
}

impl FaultQueue {
    pub fn faults(self) -> u8 {
        match self {
            FaultQueue::One => 1,
            FaultQueue::Two => 2,
            FaultQueue::Four => 4,
            FaultQueue::Six => 6,
        }
    }
}

impl From<u8> for FaultQueue {
    fn from(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => FaultQueue::One,
            0b01 => FaultQueue::Two,
            0b10 => FaultQueue::Four,
            _ => FaultQueue::Six,
        }
    }
}

/// Continuous conversion rate (CR1/CR0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionRate {
    /// 0.25 Hz
    Hz0_25 = 0b00,
    /// 1 Hz
    Hz1 = 0b01,
    /// 4 Hz, power-on default
    Hz4 = 0b10,
    /// 8 Hz
    Hz8 = 0b11,
}

impl ConversionRate {
    /// Time between two conversions.
    pub fn period_ms(self) -> u32 {
        match self {
            ConversionRate::Hz0_25 => 4000,
            ConversionRate::Hz1 => 1000,
            ConversionRate::Hz4 => 250,
            ConversionRate::Hz8 => 125,
        }
    }
}

impl Default for ConversionRate {
    fn default() -> Self {
        ConversionRate::Hz4
    }
}

impl From<u8> for ConversionRate {
    fn from(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => ConversionRate::Hz0_25,
            0b01 => ConversionRate::Hz1,
            0b10 => ConversionRate::Hz4,
            _ => ConversionRate::Hz8,
        }
    }
}

/// Image of the two-byte configuration register.
///
/// Every `with_*` method touches only its own field; all other bits,
/// including ones this type does not name, pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration([u8; 2]);

impl Configuration {
    /// Register contents after power-up: 12-bit, 4 Hz, comparator, active low.
    pub const POWER_ON: Configuration = Configuration([0x60, 0xA0]);

    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Configuration(bytes)
    }

    pub const fn to_bytes(self) -> [u8; 2] {
        self.0
    }

    pub fn shutdown(&self) -> bool {
        get_bits!(self.0[0], SD_MSK, SD_POS) != 0
    }

    pub fn with_shutdown(mut self, shutdown: bool) -> Self {
        self.0[0] = set_bits!(self.0[0], SD_MSK, SD_POS, shutdown as u8);
        self
    }

    pub fn alert_mode(&self) -> AlertMode {
        AlertMode::from(get_bits!(self.0[0], TM_MSK, TM_POS))
    }

    pub fn with_alert_mode(mut self, mode: AlertMode) -> Self {
        self.0[0] = set_bits!(self.0[0], TM_MSK, TM_POS, mode as u8);
        self
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::from(get_bits!(self.0[0], POL_MSK, POL_POS))
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.0[0] = set_bits!(self.0[0], POL_MSK, POL_POS, polarity as u8);
        self
    }

    pub fn fault_queue(&self) -> FaultQueue {
        FaultQueue::from(get_bits!(self.0[0], FQ_MSK, FQ_POS))
    }

    pub fn with_fault_queue(mut self, faults: FaultQueue) -> Self {
        self.0[0] = set_bits!(self.0[0], FQ_MSK, FQ_POS, faults as u8);
        self
    }

    /// OS bit. Reads 1 once a one-shot conversion has finished.
    pub fn one_shot(&self) -> bool {
        get_bits!(self.0[0], OS_MSK, OS_POS) != 0
    }

    /// Set the OS bit, which starts a single conversion when written.
    pub fn with_one_shot(mut self) -> Self {
        self.0[0] = set_bits!(self.0[0], OS_MSK, OS_POS, 1);
        self
    }

    /// EM bit: `true` selects the 13-bit temperature format.
    pub fn extended_mode(&self) -> bool {
        get_bits!(self.0[1], EM_MSK, EM_POS) != 0
    }

    pub fn with_extended_mode(mut self, extended: bool) -> Self {
        self.0[1] = set_bits!(self.0[1], EM_MSK, EM_POS, extended as u8);
        self
    }

    /// AL bit, read-only on the device.
    pub fn alert(&self) -> bool {
        get_bits!(self.0[1], AL_MSK, AL_POS) != 0
    }

    pub fn conversion_rate(&self) -> ConversionRate {
        ConversionRate::from(get_bits!(self.0[1], CR_MSK, CR_POS))
    }

    pub fn with_conversion_rate(mut self, rate: ConversionRate) -> Self {
        self.0[1] = set_bits!(self.0[1], CR_MSK, CR_POS, rate as u8);
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::POWER_ON
    }
}

impl From<[u8; 2]> for Configuration {
    fn from(bytes: [u8; 2]) -> Self {
        Configuration(bytes)
    }
}

impl From<Configuration> for [u8; 2] {
    fn from(config: Configuration) -> Self {
        config.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ONES: Configuration = Configuration::from_bytes([0xFF, 0xFF]);

    #[test]
    fn test_power_on_fields() {
        let config = Configuration::POWER_ON;
        assert!(!config.shutdown());
        assert_eq!(config.alert_mode(), AlertMode::Comparator);
        assert_eq!(config.polarity(), Polarity::ActiveLow);
        assert_eq!(config.fault_queue(), FaultQueue::One);
        assert!(!config.one_shot());
        assert!(!config.extended_mode());
        assert!(config.alert());
        assert_eq!(config.conversion_rate(), ConversionRate::Hz4);
    }

    #[test]
    fn test_conversion_rate_isolation() {
        let config = ALL_ONES.with_conversion_rate(ConversionRate::Hz8);
        assert_eq!(config.to_bytes(), [0xFF, 0xFF]);

        let config = ALL_ONES.with_conversion_rate(ConversionRate::Hz0_25);
        assert_eq!(config.to_bytes(), [0xFF, 0x3F]);
        assert!(config.shutdown());
        assert_eq!(config.alert_mode(), AlertMode::Thermostat);
        assert_eq!(config.polarity(), Polarity::ActiveHigh);
        assert_eq!(config.fault_queue(), FaultQueue::Six);
        assert!(config.extended_mode());
        assert!(config.alert());
    }

    #[test]
    fn test_byte0_fields() {
        let zero = Configuration::from_bytes([0x00, 0x00]);
        assert_eq!(zero.with_shutdown(true).to_bytes(), [0x01, 0x00]);
        assert_eq!(zero.with_alert_mode(AlertMode::Thermostat).to_bytes(), [0x02, 0x00]);
        assert_eq!(zero.with_polarity(Polarity::ActiveHigh).to_bytes(), [0x04, 0x00]);
        assert_eq!(zero.with_fault_queue(FaultQueue::Four).to_bytes(), [0x10, 0x00]);
        assert_eq!(zero.with_one_shot().to_bytes(), [0x80, 0x00]);

        assert_eq!(ALL_ONES.with_shutdown(false).to_bytes(), [0xFE, 0xFF]);
        assert_eq!(ALL_ONES.with_alert_mode(AlertMode::Comparator).to_bytes(), [0xFD, 0xFF]);
        assert_eq!(ALL_ONES.with_polarity(Polarity::ActiveLow).to_bytes(), [0xFB, 0xFF]);
        assert_eq!(ALL_ONES.with_fault_queue(FaultQueue::One).to_bytes(), [0xE7, 0xFF]);
    }

    #[test]
    fn test_byte1_fields() {
        let zero = Configuration::from_bytes([0x00, 0x00]);
        assert_eq!(zero.with_extended_mode(true).to_bytes(), [0x00, 0x10]);
        assert_eq!(zero.with_conversion_rate(ConversionRate::Hz1).to_bytes(), [0x00, 0x40]);
        assert_eq!(ALL_ONES.with_extended_mode(false).to_bytes(), [0xFF, 0xEF]);
    }

    #[test]
    fn test_out_of_range_values_wrap() {
        assert_eq!(ConversionRate::from(7), ConversionRate::Hz8);
        assert_eq!(ConversionRate::from(4), ConversionRate::Hz0_25);
        assert_eq!(FaultQueue::from(6), FaultQueue::Four);
        assert_eq!(AlertMode::from(2), AlertMode::Comparator);
        assert_eq!(Polarity::from(3), Polarity::ActiveHigh);

        // a wide value cannot spill into neighbouring fields
        assert_eq!(set_bits!(0x00u8, FQ_MSK, FQ_POS, 0xFFu8), 0x18);
        assert_eq!(set_bits!(0x00u8, CR_MSK, CR_POS, 0x07u8), 0xC0);
    }

    #[test]
    fn test_fault_counts_and_periods() {
        assert_eq!(FaultQueue::Six.faults(), 6);
        assert_eq!(ConversionRate::Hz0_25.period_ms(), 4000);
        assert_eq!(ConversionRate::default(), ConversionRate::Hz4);
    }
}
