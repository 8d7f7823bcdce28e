//! # ISL29501 Time-of-Flight Distance Sensor Driver
//!
//! This crate provides a `no_std` driver for the Renesas ISL29501 time-of-flight DSP as found
//! on boards that pair it with a small calibration EEPROM on the same I2C bus.
//!
//! Bring-up is a fixed sequence: factory reset, copy of the 13 calibration bytes from the
//! EEPROM into the DSP, the recommended register configuration (each write is read back for
//! diagnostics), and a read of the device ID. After that every measurement is a single-shot
//! cycle: write the sample trigger, read the two result registers, convert to meters.
//!
//! The driver is blocking by default; enable the `async` feature for an
//! `embedded-hal-async` flavour with the same API.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use isl29501::Isl29501;
//!
//! let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! let delay = embedded_hal_mock::eh1::delay::NoopDelay;
//! let mut sensor = Isl29501::new(i2c, delay);
//!
//! let report = sensor.initialize().unwrap();
//! println!("{}", report);
//!
//! let distance = sensor.sample_distance().unwrap();
//! println!("Distance: {}", distance);
//! ```
//!
//! ## Sharing the bus
//!
//! The driver owns its bus handle and every operation borrows it mutably, so a register
//! read (pointer write followed by a read) or the calibration copy can never interleave with
//! another transaction issued through the driver. To share the physical bus with other
//! devices, hand the driver an `embedded-hal-bus` device such as `RefCellDevice` or
//! `CriticalSectionDevice`.
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod fmt; // <-- must be first module!

pub mod calibration;
pub mod config;
pub mod register;
pub mod sampler;
pub mod units;

#[cfg(not(feature = "async"))]
use embedded_hal::{delay::DelayNs, i2c::I2c};
#[cfg(feature = "async")]
use embedded_hal_async::{delay::DelayNs, i2c::I2c};

pub use calibration::CalibrationBlock;
pub use config::{
    Config, MismatchPolicy, RegisterReadback, CONFIGURATION_LEN, RECOMMENDED_CONFIGURATION,
};
pub use register::{Command, Register};
pub use sampler::{compute_distance, DistanceSink, RawDistance, RunSummary};
pub use units::Distance;

/// Everything observed while bringing the sensor up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitReport {
    /// Calibration bytes copied from the EEPROM
    pub calibration: CalibrationBlock,
    /// Recommended configuration registers, in the order they were written
    pub readbacks: [RegisterReadback; CONFIGURATION_LEN],
    /// Content of the device ID register
    pub device_id: u8,
}

impl InitReport {
    /// Configuration registers that did not read back the written value.
    pub fn mismatches(&self) -> impl Iterator<Item = &RegisterReadback> {
        self.readbacks.iter().filter(|r| !r.is_match())
    }
}

impl core::fmt::Display for InitReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for r in &self.readbacks {
            write!(
                f,
                "Register {:#04x}: wrote {:#04x}, read {:#04x}",
                r.register, r.written, r.read_back
            )?;
            if !r.is_match() {
                f.write_str(" (mismatch)")?;
            }
            f.write_str("\n")?;
        }
        write!(f, "Device ID: {:#04x}", self.device_id)
    }
}

/// ISL29501 time-of-flight distance sensor driver.
///
/// The driver owns the I2C bus shared by the DSP and its calibration EEPROM, plus a delay
/// used for the optional settle time between sample trigger and result read.
pub struct Isl29501<I2C, D> {
    /// I2C interface reaching both the DSP and the EEPROM
    i2c: I2C,
    /// Delay implementation for the sample settle time
    delay: D,
    /// Device addresses and policies
    config: Config,
    /// Set by a successful [`initialize`](Self::initialize), cleared by a reset
    initialized: bool,
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
    /// Creates a driver using the default [`Config`] (DSP at 0x57, EEPROM at 0x50).
    ///
    /// No bus traffic happens until [`initialize`](Self::initialize) is called.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_config(i2c, delay, Config::default())
    }

    /// Creates a driver with an explicit configuration.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use isl29501::{Config, Isl29501, MismatchPolicy};
    ///
    /// let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
    /// let delay = embedded_hal_mock::eh1::delay::NoopDelay;
    /// let config = Config::default()
    ///     .with_mismatch_policy(MismatchPolicy::FailFast)
    ///     .with_settle_time_us(100);
    ///
    /// let mut sensor = Isl29501::with_config(i2c, delay, config);
    /// sensor.initialize().unwrap();
    /// ```
    pub fn with_config(i2c: I2C, delay: D, config: Config) -> Self {
        Self {
            i2c,
            delay,
            config,
            initialized: false,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `true` once [`initialize`](Self::initialize) has completed successfully and no
    /// factory reset has been issued since.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Gives back the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Gives back the I2C bus and the delay.
    pub fn release_all(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Restores every DSP register to its factory value.
    ///
    /// The DSP does not acknowledge the reset in any readable way, so nothing is
    /// verified here.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If there was an I2C communication error
    pub async fn factory_reset(&mut self) -> Result<(), Error<E>> {
        self.initialized = false;
        let dsp = self.config.dsp_address;
        self.write_register(dsp, Register::Command, Command::FactoryReset.into())
            .await
    }

    /// Writes [`RECOMMENDED_CONFIGURATION`] in order, reading every register back
    /// right after writing it.
    ///
    /// With [`MismatchPolicy::Warn`] a register that reads back a different value is
    /// logged and the sequence continues. With [`MismatchPolicy::FailFast`] the first
    /// mismatch ends the sequence.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If there was an I2C communication error; the
    ///   remaining entries are not written
    /// * `Err(Error::ConfigurationMismatch(_))` - On a mismatch under `FailFast`
    pub async fn apply_recommended_configuration(
        &mut self,
    ) -> Result<[RegisterReadback; CONFIGURATION_LEN], Error<E>> {
        let dsp = self.config.dsp_address;
        let mut readbacks = [RegisterReadback {
            register: 0,
            written: 0,
            read_back: 0,
        }; CONFIGURATION_LEN];

        for (slot, &(register, value)) in readbacks.iter_mut().zip(&RECOMMENDED_CONFIGURATION) {
            self.write_register(dsp, register, value).await?;
            let observed = self.read_register(dsp, register).await?;
            let entry = RegisterReadback {
                register: register.into(),
                written: value,
                read_back: observed,
            };
            debug!("Value @ {:#x} : {:#x}", entry.register, entry.read_back);

            if !entry.is_match() {
                match self.config.mismatch_policy {
                    MismatchPolicy::Warn => warn!(
                        "Register {:#x} reads back {:#x}, wrote {:#x}",
                        entry.register,
                        entry.read_back,
                        entry.written
                    ),
                    MismatchPolicy::FailFast => {
                        error!(
                            "Register {:#x} reads back {:#x}, wrote {:#x}",
                            entry.register,
                            entry.read_back,
                            entry.written
                        );
                        return Err(Error::ConfigurationMismatch(entry));
                    }
                }
            }
            *slot = entry;
        }
        Ok(readbacks)
    }

    /// Reads the device ID register.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If there was an I2C communication error
    pub async fn device_id(&mut self) -> Result<u8, Error<E>> {
        let dsp = self.config.dsp_address;
        self.read_register(dsp, Register::DeviceId).await
    }

    /// Brings the sensor up.
    ///
    /// Runs the factory reset, copies the calibration from the EEPROM, applies the
    /// recommended configuration and reads the device ID. The device ID is reported, not
    /// checked. The sampling loops ([`run_for`](Self::run_for),
    /// [`run_until`](Self::run_until)) refuse to run until this has succeeded; a failed
    /// call leaves the driver uninitialized.
    ///
    /// # Returns
    ///
    /// * `Ok(InitReport)` - What was copied, written and read back
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If there was an I2C communication error; the
    ///   sequence stops at the failing transaction
    /// * `Err(Error::ConfigurationMismatch(_))` - On a read-back mismatch under
    ///   [`MismatchPolicy::FailFast`]
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use isl29501::Isl29501;
    ///
    /// let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
    /// let delay = embedded_hal_mock::eh1::delay::NoopDelay;
    /// let mut sensor = Isl29501::new(i2c, delay);
    ///
    /// let report = sensor.initialize().unwrap();
    /// for mismatch in report.mismatches() {
    ///     println!("register {:#04x} did not stick", mismatch.register);
    /// }
    /// println!("Device ID: {:#04x}", report.device_id);
    /// ```
    pub async fn initialize(&mut self) -> Result<InitReport, Error<E>> {
        info!("Factory reset");
        self.factory_reset().await?;

        let calibration = self.transfer_calibration().await?;

        info!("Writing recommended configuration");
        let readbacks = self.apply_recommended_configuration().await?;

        let device_id = self.device_id().await?;
        info!("Device ID: {:#x}", device_id);

        self.initialized = true;
        Ok(InitReport {
            calibration,
            readbacks,
            device_id,
        })
    }

    /// Writes a single byte to a register of `device`.
    ///
    /// One two-byte write transaction: register address, then value.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If there was an I2C communication error
    pub async fn write_register<R>(
        &mut self,
        device: u8,
        register: R,
        value: u8,
    ) -> Result<(), Error<E>>
    where
        R: Into<u8>,
    {
        let reg: u8 = register.into();
        trace!("write {:#x}[{:#x}] <- {:#x}", device, reg, value);
        self.i2c.write(device, &[reg, value]).await?;
        Ok(())
    }

    /// Reads a single byte from a register of `device`.
    ///
    /// A one-byte write sets the register pointer, then a separate one-byte read
    /// fetches the value.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If either transaction failed
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use isl29501::{Isl29501, Register};
    ///
    /// let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
    /// let delay = embedded_hal_mock::eh1::delay::NoopDelay;
    /// let mut sensor = Isl29501::new(i2c, delay);
    ///
    /// let control = sensor.read_register(0x57, Register::SampleControl).unwrap();
    /// let eeprom_byte = sensor.read_register(0x50, 0x21u8).unwrap();
    /// ```
    pub async fn read_register<R>(&mut self, device: u8, register: R) -> Result<u8, Error<E>>
    where
        R: Into<u8>,
    {
        let mut buffer = [0u8; 1];
        self.read_registers(device, register, &mut buffer).await?;
        Ok(buffer[0])
    }

    /// Fills `buffer` starting at a register of `device`.
    ///
    /// A one-byte write sets the register pointer, then a single read transaction
    /// of `buffer.len()` bytes follows.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If either transaction failed
    pub async fn read_registers<R>(
        &mut self,
        device: u8,
        register: R,
        buffer: &mut [u8],
    ) -> Result<(), Error<E>>
    where
        R: Into<u8>,
    {
        let reg: u8 = register.into();
        self.i2c.write(device, &[reg]).await?;
        self.i2c.read(device, buffer).await?;
        trace!("read {:#x}[{:#x}] -> {:?}", device, reg, buffer);
        Ok(())
    }
}

/// Error type for ISL29501 operations.
///
/// # Examples
///
/// ```rust,no_run
/// use isl29501::Error;
///
/// let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
/// let delay = embedded_hal_mock::eh1::delay::NoopDelay;
/// let mut sensor = isl29501::Isl29501::new(i2c, delay);
///
/// match sensor.initialize() {
///     Ok(report) => println!("{}", report),
///     Err(Error::I2cError(e)) => println!("I2C communication error: {:?}", e),
///     Err(Error::ConfigurationMismatch(r)) => {
///         println!("register {:#04x} reads {:#04x}", r.register, r.read_back)
///     }
/// }
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: core::fmt::Debug> {
    /// I2C communication error from the underlying hardware
    I2cError(E),
    /// A configuration register did not hold the value just written
    /// (only with [`MismatchPolicy::FailFast`])
    ConfigurationMismatch(RegisterReadback),
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl<E: core::fmt::Debug> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::I2cError(error)
    }
}

#[cfg(all(test, not(feature = "async")))]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock, Transaction};

    const DSP: u8 = 0x57;
    const EEPROM: u8 = 0x50;
    const CALIBRATION: [u8; 13] = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D,
    ];

    fn failing(transaction: Transaction) -> Transaction {
        transaction.with_error(ErrorKind::Other)
    }

    fn reset() -> Transaction {
        Transaction::write(DSP, vec![0xB0, 0xD7])
    }

    fn calibration_copy(bytes: &[u8; 13]) -> Vec<Transaction> {
        let mut transactions = Vec::new();
        for (reg, &byte) in (0x21u8..).zip(bytes) {
            transactions.push(Transaction::write(EEPROM, vec![reg]));
            transactions.push(Transaction::read(EEPROM, vec![byte]));
        }
        for (reg, &byte) in (0x24u8..).zip(bytes) {
            transactions.push(Transaction::write(DSP, vec![reg, byte]));
        }
        transactions
    }

    fn configure_entry(register: u8, written: u8, read_back: u8) -> Vec<Transaction> {
        vec![
            Transaction::write(DSP, vec![register, written]),
            Transaction::write(DSP, vec![register]),
            Transaction::read(DSP, vec![read_back]),
        ]
    }

    fn echo_configuration() -> Vec<Transaction> {
        RECOMMENDED_CONFIGURATION
            .iter()
            .flat_map(|&(r, v)| configure_entry(r.into(), v, v))
            .collect()
    }

    fn read_device_id(id: u8) -> Vec<Transaction> {
        vec![
            Transaction::write(DSP, vec![0x00]),
            Transaction::read(DSP, vec![id]),
        ]
    }

    fn full_bring_up() -> Vec<Transaction> {
        let mut transactions = vec![reset()];
        transactions.extend(calibration_copy(&CALIBRATION));
        transactions.extend(echo_configuration());
        transactions.extend(read_device_id(0x0A));
        transactions
    }

    #[test]
    fn write_register_is_one_two_byte_write() {
        let expectations = [Transaction::write(DSP, vec![0x10, 0x04])];
        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        sensor
            .write_register(DSP, Register::IntegrationPeriod, 0x04)
            .unwrap();
        sensor.release().done();
    }

    #[test]
    fn read_register_is_pointer_write_then_read() {
        let expectations = [
            Transaction::write(EEPROM, vec![0x21]),
            Transaction::read(EEPROM, vec![0x5A]),
        ];
        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        assert_eq!(sensor.read_register(EEPROM, 0x21u8).unwrap(), 0x5A);
        sensor.release().done();
    }

    #[test]
    fn read_registers_reads_whole_buffer_in_one_transaction() {
        let expectations = [
            Transaction::write(DSP, vec![0xD1]),
            Transaction::read(DSP, vec![0x12, 0x34]),
        ];
        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        let mut buffer = [0u8; 2];
        sensor
            .read_registers(DSP, Register::DistanceMsb, &mut buffer)
            .unwrap();
        assert_eq!(buffer, [0x12, 0x34]);
        sensor.release().done();
    }

    #[test]
    fn failed_pointer_write_skips_read() {
        let expectations = [failing(Transaction::write(DSP, vec![0x00]))];
        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        let err = sensor.read_register(DSP, Register::DeviceId).unwrap_err();
        assert!(matches!(err, Error::I2cError(ErrorKind::Other)));
        sensor.release().done();
    }

    #[test]
    fn failed_read_is_reported() {
        let expectations = [
            Transaction::write(DSP, vec![0x00]),
            failing(Transaction::read(DSP, vec![0x00])),
        ];
        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        assert!(sensor.read_register(DSP, Register::DeviceId).is_err());
        sensor.release().done();
    }

    #[test]
    fn initialize_runs_full_sequence() {
        let expectations = full_bring_up();

        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        assert!(!sensor.is_initialized());
        let report = sensor.initialize().unwrap();

        assert!(sensor.is_initialized());
        assert_eq!(report.calibration.as_bytes(), &CALIBRATION);
        assert_eq!(report.device_id, 0x0A);
        for (r, &(register, value)) in report.readbacks.iter().zip(&RECOMMENDED_CONFIGURATION) {
            assert_eq!(r.register, u8::from(register));
            assert_eq!(r.written, value);
            assert_eq!(r.read_back, value);
        }
        assert_eq!(report.mismatches().count(), 0);
        sensor.release().done();
    }

    #[test]
    fn mismatch_is_reported_but_not_fatal_by_default() {
        let mut expectations = vec![reset()];
        expectations.extend(calibration_copy(&CALIBRATION));
        for (i, &(register, value)) in RECOMMENDED_CONFIGURATION.iter().enumerate() {
            let read_back = if i == 2 { 0x00 } else { value };
            expectations.extend(configure_entry(register.into(), value, read_back));
        }
        expectations.extend(read_device_id(0x0A));

        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        let report = sensor.initialize().unwrap();

        let mismatches: Vec<_> = report.mismatches().copied().collect();
        assert_eq!(
            mismatches,
            [RegisterReadback {
                register: 0x13,
                written: 0x71,
                read_back: 0x00,
            }]
        );
        assert!(sensor.is_initialized());
        sensor.release().done();
    }

    #[test]
    fn mismatch_aborts_under_fail_fast() {
        let mut expectations = vec![reset()];
        expectations.extend(calibration_copy(&CALIBRATION));
        expectations.extend(configure_entry(0x10, 0x04, 0x04));
        expectations.extend(configure_entry(0x11, 0x6E, 0x6F));

        let config = Config::default().with_mismatch_policy(MismatchPolicy::FailFast);
        let mut sensor = Isl29501::with_config(Mock::new(&expectations), NoopDelay, config);
        let err = sensor.initialize().unwrap_err();

        assert!(matches!(
            err,
            Error::ConfigurationMismatch(RegisterReadback {
                register: 0x11,
                written: 0x6E,
                read_back: 0x6F,
            })
        ));
        assert!(!sensor.is_initialized());
        sensor.release().done();
    }

    #[test]
    fn bus_failure_on_seventh_configuration_write_aborts() {
        let mut expectations = vec![reset()];
        expectations.extend(calibration_copy(&CALIBRATION));
        for &(register, value) in &RECOMMENDED_CONFIGURATION[..6] {
            expectations.extend(configure_entry(register.into(), value, value));
        }
        expectations.push(failing(Transaction::write(DSP, vec![0x90, 0x0F])));

        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        let err = sensor.initialize().unwrap_err();
        assert!(matches!(err, Error::I2cError(ErrorKind::Other)));
        assert!(!sensor.is_initialized());
        sensor.release().done();
    }

    #[test]
    fn failed_reset_stops_before_calibration() {
        let expectations = [failing(reset())];
        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        assert!(sensor.initialize().is_err());
        sensor.release().done();
    }

    #[test]
    fn sampling_loops_do_nothing_after_failed_initialize() {
        let expectations = [failing(reset())];
        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        assert!(sensor.initialize().is_err());

        let mut seen = 0;
        let summary = sensor.run_for(1, &mut |_d: Distance| seen += 1);
        assert_eq!(summary, RunSummary::default());

        let stop = core::sync::atomic::AtomicBool::new(false);
        let summary = sensor.run_until(&stop, &mut |_d: Distance| seen += 1);
        assert_eq!(summary, RunSummary::default());

        assert_eq!(seen, 0);
        sensor.release().done();
    }

    #[test]
    fn factory_reset_clears_initialized_state() {
        let mut expectations = full_bring_up();
        expectations.push(reset());

        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        sensor.initialize().unwrap();
        assert!(sensor.is_initialized());

        sensor.factory_reset().unwrap();
        assert!(!sensor.is_initialized());
        let summary = sensor.run_for(3, &mut |_d: Distance| {});
        assert_eq!(summary, RunSummary::default());
        sensor.release().done();
    }

    #[test]
    fn failed_reinitialize_blocks_sampling_again() {
        let mut expectations = full_bring_up();
        expectations.push(reset());
        expectations.push(Transaction::write(EEPROM, vec![0x21]));
        expectations.push(failing(Transaction::read(EEPROM, vec![0x00])));

        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        sensor.initialize().unwrap();
        assert!(sensor.initialize().is_err());
        assert!(!sensor.is_initialized());
        sensor.release().done();
    }

    #[test]
    fn sampling_loop_runs_after_successful_initialize() {
        let mut expectations = full_bring_up();
        expectations.extend([
            Transaction::write(DSP, vec![0xB0, 0x49]),
            Transaction::write(DSP, vec![0xD1]),
            Transaction::read(DSP, vec![0x80]),
            Transaction::write(DSP, vec![0xD2]),
            Transaction::read(DSP, vec![0x00]),
        ]);

        let mut sensor = Isl29501::new(Mock::new(&expectations), NoopDelay);
        sensor.initialize().unwrap();

        let mut distances = Vec::new();
        let summary = sensor.run_for(1, &mut |d: Distance| distances.push(d));
        assert_eq!(summary.samples, 1);
        assert_eq!(distances, [Distance::from_raw(0x8000)]);
        sensor.release().done();
    }

    #[test]
    fn custom_addresses_are_used() {
        let expectations = [
            Transaction::write(0x58, vec![0xB0, 0xD7]),
            Transaction::write(0x58, vec![0x00]),
            Transaction::read(0x58, vec![0x42]),
        ];
        let config = Config::default().with_dsp_address(0x58);
        let mut sensor = Isl29501::with_config(Mock::new(&expectations), NoopDelay, config);
        sensor.factory_reset().unwrap();
        assert_eq!(sensor.device_id().unwrap(), 0x42);
        assert_eq!(sensor.config().dsp_address, 0x58);
        sensor.release().done();
    }

    #[test]
    fn report_display_lists_registers_and_id() {
        let mut readbacks = [RegisterReadback {
            register: 0,
            written: 0,
            read_back: 0,
        }; 8];
        for (slot, &(register, value)) in readbacks.iter_mut().zip(&RECOMMENDED_CONFIGURATION) {
            *slot = RegisterReadback {
                register: register.into(),
                written: value,
                read_back: value,
            };
        }
        readbacks[7].read_back = 0x00;
        let report = InitReport {
            calibration: CalibrationBlock::new(CALIBRATION),
            readbacks,
            device_id: 0x0A,
        };

        let text = std::format!("{report}");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Register 0x10: wrote 0x04, read 0x04");
        assert_eq!(lines[7], "Register 0x91: wrote 0xff, read 0x00 (mismatch)");
        assert_eq!(lines[8], "Device ID: 0x0a");
    }
}
