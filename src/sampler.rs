//! Single-shot distance acquisition and the bounded sampling loop.

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(feature = "async"))]
use embedded_hal::{delay::DelayNs, i2c::I2c};
#[cfg(feature = "async")]
use embedded_hal_async::{delay::DelayNs, i2c::I2c};

use crate::register::{Command, Register};
use crate::units::Distance;
use crate::{Error, Isl29501};

/// Raw 16-bit distance result as read from registers 0xD1 and 0xD2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawDistance {
    /// Most significant byte (0xD1)
    pub msb: u8,
    /// Least significant byte (0xD2)
    pub lsb: u8,
}

impl RawDistance {
    /// The combined unsigned result.
    #[must_use]
    pub fn value(self) -> u16 {
        u16::from_be_bytes([self.msb, self.lsb])
    }

    /// The result converted to a distance.
    #[must_use]
    pub fn distance(self) -> Distance {
        Distance::from_raw(self.value())
    }
}

/// Converts the two distance result bytes to a distance.
#[must_use]
pub fn compute_distance(msb: u8, lsb: u8) -> Distance {
    RawDistance { msb, lsb }.distance()
}

/// Receives the outcome of every cycle of the sampling loop.
pub trait DistanceSink<E: core::fmt::Debug> {
    /// Called with each successful measurement.
    fn on_distance(&mut self, distance: Distance);

    /// Called when a cycle failed. The loop carries on afterwards.
    fn on_error(&mut self, error: &Error<E>) {
        let _ = error;
    }
}

impl<E, F> DistanceSink<E> for F
where
    E: core::fmt::Debug,
    F: FnMut(Distance),
{
    fn on_distance(&mut self, distance: Distance) {
        self(distance);
    }
}

/// Counts of what happened during a sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunSummary {
    /// Cycles that produced a distance
    pub samples: u32,
    /// Cycles that failed on the bus
    pub failures: u32,
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
    /// Starts one acquisition cycle. The DSP runs in single-shot mode and stays
    /// idle until the next trigger.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If there was an I2C communication error
    pub async fn start_sample(&mut self) -> Result<(), Error<E>> {
        let dsp = self.config.dsp_address;
        self.write_register(dsp, Register::Command, Command::SampleStart.into())
            .await
    }

    /// Triggers a measurement and reads the raw result registers.
    ///
    /// There is no ready poll: the result is read right after the trigger,
    /// optionally after [`Config::settle_time_us`](crate::Config::settle_time_us).
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If there was an I2C communication error
    pub async fn sample_raw(&mut self) -> Result<RawDistance, Error<E>> {
        let dsp = self.config.dsp_address;
        self.start_sample().await?;
        if self.config.settle_time_us > 0 {
            self.delay.delay_us(self.config.settle_time_us).await;
        }
        let msb = self.read_register(dsp, Register::DistanceMsb).await?;
        let lsb = self.read_register(dsp, Register::DistanceLsb).await?;
        debug!("Distance registers [{}, {}]", msb, lsb);
        Ok(RawDistance { msb, lsb })
    }

    /// Triggers a measurement and returns the distance.
    ///
    /// # Errors
    ///
    /// * `Err(Error::I2cError(E))` - If there was an I2C communication error
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
    /// sensor.initialize().unwrap();
    /// let distance = sensor.sample_distance().unwrap();
    /// println!("Distance: {}", distance);
    /// ```
    pub async fn sample_distance(&mut self) -> Result<Distance, Error<E>> {
        Ok(self.sample_raw().await?.distance())
    }

    /// Runs `cycles` measurements, handing every outcome to `sink`.
    ///
    /// Failed cycles are reported to the sink and counted; they do not end the
    /// run. Nothing is sampled unless [`initialize`](Self::initialize) has
    /// succeeded; the empty summary is returned instead.
    pub async fn run_for<S>(&mut self, cycles: u32, sink: &mut S) -> RunSummary
    where
        S: DistanceSink<E>,
    {
        let mut summary = RunSummary::default();
        if !self.ready_to_sample() {
            return summary;
        }
        for _ in 0..cycles {
            self.sample_once(sink, &mut summary).await;
        }
        summary
    }

    /// Measures until `stop` is set, handing every outcome to `sink`.
    ///
    /// The flag is checked once per cycle, before the trigger is written, so a
    /// started cycle always completes. Like [`run_for`](Self::run_for), this
    /// does nothing on a sensor that has not been initialized.
    pub async fn run_until<S>(&mut self, stop: &AtomicBool, sink: &mut S) -> RunSummary
    where
        S: DistanceSink<E>,
    {
        let mut summary = RunSummary::default();
        if !self.ready_to_sample() {
            return summary;
        }
        while !stop.load(Ordering::Acquire) {
            self.sample_once(sink, &mut summary).await;
        }
        info!(
            "Sampling stopped after {} samples, {} failures",
            summary.samples,
            summary.failures
        );
        summary
    }

    fn ready_to_sample(&self) -> bool {
        if !self.initialized {
            warn!("Sensor not initialized, sampling skipped");
        }
        self.initialized
    }

    async fn sample_once<S>(&mut self, sink: &mut S, summary: &mut RunSummary)
    where
        S: DistanceSink<E>,
    {
        match self.sample_distance().await {
            Ok(distance) => {
                summary.samples = summary.samples.saturating_add(1);
                sink.on_distance(distance);
            }
            Err(e) => {
                summary.failures = summary.failures.saturating_add(1);
                error!("Distance sample failed ({} so far)", summary.failures);
                sink.on_error(&e);
            }
        }
    }
}
