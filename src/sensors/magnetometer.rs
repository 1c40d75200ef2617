//! Magnetometer configuration values for the HMC5883L
//!
//! All tables are bit-exact against the HMC5883L datasheet: sample
//! averaging and measurement bias in configuration register A, gain in
//! configuration register B, operating mode in the mode register.

/// Samples averaged per measurement output (MA field of CRA)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleAveraging {
    /// No averaging, one sample per output
    X1 = 0b00,
    /// Average 2 samples
    X2 = 0b01,
    /// Average 4 samples
    X4 = 0b10,
    /// Average 8 samples
    X8 = 0b11,
}

impl SampleAveraging {
    /// The 2-bit MA encoding
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a 2-bit MA field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Self::X1),
            0b01 => Some(Self::X2),
            0b10 => Some(Self::X4),
            0b11 => Some(Self::X8),
            _ => None,
        }
    }

    /// Number of samples averaged
    #[must_use]
    pub const fn sample_count(self) -> u8 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }
}

/// Continuous-mode data output rate (DO field of CRA)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputRate {
    /// 0.75 Hz
    Hz0_75 = 0b000,
    /// 1.5 Hz
    Hz1_5 = 0b001,
    /// 3 Hz
    Hz3 = 0b010,
    /// 7.5 Hz
    Hz7_5 = 0b011,
    /// 15 Hz (power-on default)
    Hz15 = 0b100,
    /// 30 Hz
    Hz30 = 0b101,
    /// 75 Hz
    Hz75 = 0b110,
}

impl OutputRate {
    /// The 3-bit DO encoding
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a 3-bit DO field
    ///
    /// `0b111` is reserved on the device and decodes to `None`.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Hz0_75),
            0b001 => Some(Self::Hz1_5),
            0b010 => Some(Self::Hz3),
            0b011 => Some(Self::Hz7_5),
            0b100 => Some(Self::Hz15),
            0b101 => Some(Self::Hz30),
            0b110 => Some(Self::Hz75),
            _ => None,
        }
    }

    /// Output rate in Hz
    #[must_use]
    pub const fn rate_hz(self) -> f32 {
        match self {
            Self::Hz0_75 => 0.75,
            Self::Hz1_5 => 1.5,
            Self::Hz3 => 3.0,
            Self::Hz7_5 => 7.5,
            Self::Hz15 => 15.0,
            Self::Hz30 => 30.0,
            Self::Hz75 => 75.0,
        }
    }
}

/// Measurement bias applied to the sensor bridge (MS field of CRA)
///
/// The bias modes drive a current through the self-test coils, offsetting
/// every reading by a known field; the self-test procedure uses
/// `PositiveBias`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementBias {
    /// Normal measurement flow, no bias
    Normal = 0b00,
    /// Positive bias current across all axes
    PositiveBias = 0b01,
    /// Negative bias current across all axes
    NegativeBias = 0b10,
}

impl MeasurementBias {
    /// The 2-bit MS encoding
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a 2-bit MS field (`0b11` is reserved)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Self::Normal),
            0b01 => Some(Self::PositiveBias),
            0b10 => Some(Self::NegativeBias),
            _ => None,
        }
    }
}

/// Operating mode (MD field of the mode register)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Continuous measurement at the configured output rate
    Continuous = 0b00,
    /// One measurement, then the device returns to idle
    Single = 0b01,
    /// Idle (standby)
    Idle = 0b10,
}

impl OperatingMode {
    /// The 2-bit MD encoding
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a 2-bit MD field
    ///
    /// The device treats `0b11` as a second idle encoding; it decodes to
    /// [`OperatingMode::Idle`].
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Self::Continuous),
            0b01 => Some(Self::Single),
            0b10 | 0b11 => Some(Self::Idle),
            _ => None,
        }
    }
}

/// Sensor gain (GN field of CRB)
///
/// Each setting fixes both the recommended field range and the digital
/// resolution used to convert raw counts to gauss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagGain {
    /// ±0.88 Ga range, 1370 LSB/Ga
    Ga0_88 = 0b000,
    /// ±1.3 Ga range, 1090 LSB/Ga (power-on default)
    Ga1_3 = 0b001,
    /// ±1.9 Ga range, 820 LSB/Ga
    Ga1_9 = 0b010,
    /// ±2.5 Ga range, 660 LSB/Ga
    Ga2_5 = 0b011,
    /// ±4.0 Ga range, 440 LSB/Ga
    Ga4_0 = 0b100,
    /// ±4.7 Ga range, 390 LSB/Ga (the self-test gain)
    Ga4_7 = 0b101,
    /// ±5.6 Ga range, 330 LSB/Ga
    Ga5_6 = 0b110,
    /// ±8.1 Ga range, 230 LSB/Ga
    Ga8_1 = 0b111,
}

impl MagGain {
    /// The 3-bit GN encoding
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a 3-bit GN field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Ga0_88),
            0b001 => Some(Self::Ga1_3),
            0b010 => Some(Self::Ga1_9),
            0b011 => Some(Self::Ga2_5),
            0b100 => Some(Self::Ga4_0),
            0b101 => Some(Self::Ga4_7),
            0b110 => Some(Self::Ga5_6),
            0b111 => Some(Self::Ga8_1),
            _ => None,
        }
    }

    /// Recommended sensor field range in gauss
    #[must_use]
    pub const fn range_gauss(self) -> f32 {
        match self {
            Self::Ga0_88 => 0.88,
            Self::Ga1_3 => 1.3,
            Self::Ga1_9 => 1.9,
            Self::Ga2_5 => 2.5,
            Self::Ga4_0 => 4.0,
            Self::Ga4_7 => 4.7,
            Self::Ga5_6 => 5.6,
            Self::Ga8_1 => 8.1,
        }
    }

    /// Digital resolution in LSB/Ga
    ///
    /// Raw 16-bit readings divide by this to give field strength in gauss.
    #[must_use]
    pub const fn lsb_per_gauss(self) -> f32 {
        match self {
            Self::Ga0_88 => 1370.0,
            Self::Ga1_3 => 1090.0,
            Self::Ga1_9 => 820.0,
            Self::Ga2_5 => 660.0,
            Self::Ga4_0 => 440.0,
            Self::Ga4_7 => 390.0,
            Self::Ga5_6 => 330.0,
            Self::Ga8_1 => 230.0,
        }
    }
}
