//! Driver configuration and the recommended DSP register settings.

use crate::register::{Register, DSP_DEFAULT_ADDRESS, EEPROM_DEFAULT_ADDRESS};

/// Number of registers in [`RECOMMENDED_CONFIGURATION`].
pub const CONFIGURATION_LEN: usize = 8;

/// Recommended DSP configuration, written in this order after the calibration
/// transfer. Gain control must follow the integration and sample periods.
pub const RECOMMENDED_CONFIGURATION: [(Register, u8); CONFIGURATION_LEN] = [
    (Register::IntegrationPeriod, 0x04),
    (Register::SamplePeriod, 0x6E),
    (Register::SampleControl, 0x71),
    (Register::AgcOptimize, 0x22),
    (Register::AgcControl, 0x22),
    (Register::InterruptControl, 0x01),
    (Register::DriverRange, 0x0F),
    (Register::EmitterDac, 0xFF),
];

/// What to do when a configuration register reads back a different value than
/// the one just written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MismatchPolicy {
    /// Log the mismatch and keep going
    #[default]
    Warn,
    /// Stop initialization with [`Error::ConfigurationMismatch`](crate::Error::ConfigurationMismatch)
    FailFast,
}

/// Runtime configuration of the driver.
///
/// The defaults reproduce the board's factory wiring and timing: DSP at 0x57,
/// EEPROM at 0x50, read-back mismatches only logged, and no delay between the
/// sample trigger and the distance read. In the latter case the result is
/// assumed ready by the time the register-pointer write has gone out on the
/// bus; raise `settle_time_us` if the bus is fast enough to outrun the DSP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I2C address of the DSP
    pub dsp_address: u8,
    /// 7-bit I2C address of the calibration EEPROM
    pub eeprom_address: u8,
    /// Severity of configuration read-back mismatches
    pub mismatch_policy: MismatchPolicy,
    /// Delay in microseconds between the sample trigger and the result read
    pub settle_time_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dsp_address: DSP_DEFAULT_ADDRESS,
            eeprom_address: EEPROM_DEFAULT_ADDRESS,
            mismatch_policy: MismatchPolicy::Warn,
            settle_time_us: 0,
        }
    }
}

impl Config {
    /// Use a different DSP address.
    #[must_use]
    pub fn with_dsp_address(mut self, address: u8) -> Self {
        self.dsp_address = address;
        self
    }

    /// Use a different EEPROM address.
    #[must_use]
    pub fn with_eeprom_address(mut self, address: u8) -> Self {
        self.eeprom_address = address;
        self
    }

    /// Set the read-back mismatch policy.
    #[must_use]
    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }

    /// Set the settle time between sample trigger and result read.
    #[must_use]
    pub fn with_settle_time_us(mut self, settle_time_us: u32) -> Self {
        self.settle_time_us = settle_time_us;
        self
    }
}

/// One configuration register as written and as read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterReadback {
    /// Register address
    pub register: u8,
    /// Value written
    pub written: u8,
    /// Value observed right after the write
    pub read_back: u8,
}

impl RegisterReadback {
    /// `true` when the register holds the value that was written.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.written == self.read_back
    }
}
