//! Copying the factory calibration from the on-board EEPROM into the DSP.
//!
//! The EEPROM holds 13 calibration bytes starting one location past
//! [`EEPROM_CALIBRATION_BASE`](crate::register::EEPROM_CALIBRATION_BASE). They
//! must land, in the same order, in DSP registers 0x24..=0x30 before the DSP
//! produces valid distances. All 13 bytes are read before the first DSP write,
//! so a failed EEPROM read leaves the DSP untouched.

#[cfg(not(feature = "async"))]
use embedded_hal::{delay::DelayNs, i2c::I2c};
#[cfg(feature = "async")]
use embedded_hal_async::{delay::DelayNs, i2c::I2c};

use crate::register::{Register, CALIBRATION_LEN, EEPROM_CALIBRATION_START};
use crate::{Error, Isl29501};

/// Calibration bytes in EEPROM order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationBlock([u8; CALIBRATION_LEN]);

impl CalibrationBlock {
    /// Wraps raw calibration bytes.
    #[must_use]
    pub const fn new(bytes: [u8; CALIBRATION_LEN]) -> Self {
        Self(bytes)
    }

    /// The calibration bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CALIBRATION_LEN] {
        &self.0
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), keep_self),
    async(feature = "async", keep_self)
)]
impl<I2C, E, D> Isl29501<I2C, D>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
    D: DelayNs,
{
    /// Reads the calibration block from the EEPROM, one register at a time.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If any of the EEPROM reads failed
    pub async fn read_calibration(&mut self) -> Result<CalibrationBlock, Error<E>> {
        let eeprom = self.config.eeprom_address;
        let mut bytes = [0u8; CALIBRATION_LEN];
        for (offset, byte) in (0u8..).zip(bytes.iter_mut()) {
            *byte = self
                .read_register(eeprom, EEPROM_CALIBRATION_START + offset)
                .await?;
        }
        Ok(CalibrationBlock(bytes))
    }

    /// Writes a calibration block into the DSP calibration registers.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If a DSP write failed; earlier registers keep
    ///   the values already written
    pub async fn write_calibration(&mut self, block: &CalibrationBlock) -> Result<(), Error<E>> {
        let dsp = self.config.dsp_address;
        let start = u8::from(Register::CalibrationStart);
        for (offset, &byte) in (0u8..).zip(block.0.iter()) {
            self.write_register(dsp, start + offset, byte).await?;
        }
        Ok(())
    }

    /// Copies the calibration block from the EEPROM into the DSP.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If a bus transaction failed. No DSP register
    ///   is written unless all EEPROM reads succeeded.
    pub async fn transfer_calibration(&mut self) -> Result<CalibrationBlock, Error<E>> {
        info!("Copying calibration from EEPROM");
        let block = self.read_calibration().await?;
        self.write_calibration(&block).await?;
        Ok(block)
    }
}
