//! Typed configuration values and their bit encodings
//!
//! One sub-module per sensor. Every enum here is a closed value table with
//! both directions of the mapping: `bits()` encodes a value for a setter,
//! `from_bits()` decodes a register field for a getter and returns `None`
//! for reserved or out-of-table patterns.

pub mod accelerometer;
pub mod gyroscope;
pub mod magnetometer;

pub use accelerometer::AccelFullScale;
pub use gyroscope::{DlpfMode, GyroFullScale};
pub use magnetometer::{MagGain, MeasurementBias, OperatingMode, OutputRate, SampleAveraging};

/// Measurement axis selector shared by all three sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// All three axes, in X, Y, Z order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// MPU-6050 low-power cycle wake-up frequency (LP_WAKE_CTRL)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LowPowerWakeRate {
    /// Wake at 1.25 Hz
    Hz1_25 = 0,
    /// Wake at 5 Hz
    Hz5 = 1,
    /// Wake at 20 Hz
    Hz20 = 2,
    /// Wake at 40 Hz
    Hz40 = 3,
}

impl LowPowerWakeRate {
    /// The 2-bit LP_WAKE_CTRL encoding
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a 2-bit LP_WAKE_CTRL field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Hz1_25),
            1 => Some(Self::Hz5),
            2 => Some(Self::Hz20),
            3 => Some(Self::Hz40),
            _ => None,
        }
    }

    /// Wake-up frequency in Hz
    #[must_use]
    pub const fn frequency_hz(self) -> f32 {
        match self {
            Self::Hz1_25 => 1.25,
            Self::Hz5 => 5.0,
            Self::Hz20 => 20.0,
            Self::Hz40 => 40.0,
        }
    }
}
