//! Distance value and unit conversions.

use crate::register::DISTANCE_FULL_SCALE_M;

const CENTIMETERS_PER_METER: f64 = 100.0;
const INCHES_PER_METER: f64 = 39.3701;

/// A measured distance.
///
/// Values produced by the driver lie in `[0, 33.31)` meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Distance(f64);

impl Distance {
    /// Wraps a value in meters.
    #[must_use]
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    /// Converts the 16-bit fixed-point distance result to meters.
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        Self(f64::from(raw) / 65536.0 * DISTANCE_FULL_SCALE_M)
    }

    /// Distance in meters.
    #[must_use]
    pub const fn meters(self) -> f64 {
        self.0
    }

    /// Distance in centimeters.
    #[must_use]
    pub fn centimeters(self) -> f64 {
        self.0 * CENTIMETERS_PER_METER
    }

    /// Distance in inches.
    #[must_use]
    pub fn inches(self) -> f64 {
        self.0 * INCHES_PER_METER
    }

    /// Decimal digits for a four-digit `NN.NN` meter display:
    /// `[tens, ones, tenths, hundredths]`. Digits are truncated, not rounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn display_digits(self) -> [u8; 4] {
        let meters = if self.0 > 0.0 { self.0 } else { 0.0 };
        let whole = meters as u32;
        let millis = ((meters - f64::from(whole)) * 1000.0) as u32;
        [
            ((whole / 10) % 10) as u8,
            (whole % 10) as u8,
            ((millis / 100) % 10) as u8,
            ((millis / 10) % 10) as u8,
        ]
    }
}

impl core::fmt::Display for Distance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:.4} m, {:.2} cm, {:.2} in",
            self.meters(),
            self.centimeters(),
            self.inches()
        )
    }
}
