//! ISL29501 register map and the EEPROM locations read during bring-up.

/// Default 7-bit I2C address of the ISL29501 DSP.
pub const DSP_DEFAULT_ADDRESS: u8 = 0x57;

/// Default 7-bit I2C address of the calibration EEPROM on the same board.
pub const EEPROM_DEFAULT_ADDRESS: u8 = 0x50;

/// First EEPROM location of the calibration area. It holds an alignment byte,
/// the calibration data itself starts one location later.
pub const EEPROM_CALIBRATION_BASE: u8 = 0x20;

/// First EEPROM location copied into the DSP.
pub const EEPROM_CALIBRATION_START: u8 = EEPROM_CALIBRATION_BASE + 1;

/// Number of calibration bytes copied from the EEPROM into the DSP.
pub const CALIBRATION_LEN: usize = 13;

/// Full scale of the 16-bit distance result in meters.
pub const DISTANCE_FULL_SCALE_M: f64 = 33.31;

/// Register addresses for the ISL29501 DSP.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Device identification register (0x00)
    DeviceId = 0x00,
    /// Integration period register (0x10)
    IntegrationPeriod = 0x10,
    /// Sample period register (0x11)
    SamplePeriod = 0x11,
    /// Sample control register (0x13)
    SampleControl = 0x13,
    /// AGC optimisation register (0x18)
    AgcOptimize = 0x18,
    /// Automatic gain control register (0x19)
    AgcControl = 0x19,
    /// First of the calibration registers loaded from the EEPROM (0x24)
    CalibrationStart = 0x24,
    /// Interrupt control register (0x60)
    InterruptControl = 0x60,
    /// Emitter driver range register (0x90)
    DriverRange = 0x90,
    /// Emitter DAC register (0x91)
    EmitterDac = 0x91,
    /// Command register (0xB0), see [`Command`]
    Command = 0xB0,
    /// Distance result, most significant byte (0xD1)
    DistanceMsb = 0xD1,
    /// Distance result, least significant byte (0xD2)
    DistanceLsb = 0xD2,
}

impl From<Register> for u8 {
    fn from(r: Register) -> Self {
        r as u8
    }
}

/// Values accepted by [`Register::Command`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Restore every register to its factory value
    FactoryReset = 0xD7,
    /// Start a single acquisition cycle
    SampleStart = 0x49,
}

impl From<Command> for u8 {
    fn from(c: Command) -> Self {
        c as u8
    }
}
