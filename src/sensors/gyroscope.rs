//! Gyroscope and shared filter configuration values for the MPU-6050

/// Gyroscope full-scale range (FS_SEL field of GYRO_CONFIG)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±250 °/s range (most sensitive, least range)
    Dps250 = 0,
    /// ±500 °/s range
    Dps500 = 1,
    /// ±1000 °/s range
    Dps1000 = 2,
    /// ±2000 °/s range (least sensitive, most range)
    Dps2000 = 3,
}

impl GyroFullScale {
    /// The 2-bit FS_SEL encoding
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a 2-bit FS_SEL field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Dps250),
            1 => Some(Self::Dps500),
            2 => Some(Self::Dps1000),
            3 => Some(Self::Dps2000),
            _ => None,
        }
    }

    /// Sensitivity in LSB/(°/s)
    ///
    /// Raw 16-bit readings divide by this to give angular rate in °/s.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps250 => 131.0,
            Self::Dps500 => 65.5,
            Self::Dps1000 => 32.8,
            Self::Dps2000 => 16.4,
        }
    }

    /// Maximum measurable angular rate in °/s
    #[must_use]
    pub const fn max_value_dps(self) -> u16 {
        match self {
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps1000 => 1000,
            Self::Dps2000 => 2000,
        }
    }
}

/// Digital low-pass filter setting (DLPF_CFG field of CONFIG)
///
/// Shared by the gyroscope and the accelerometer. The setting also selects
/// the gyroscope output rate that the sample-rate divider divides: 8 kHz
/// when the filter is disabled or the field holds the reserved pattern,
/// 1 kHz for every active filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DlpfMode {
    /// Filter disabled: 260 Hz accel / 256 Hz gyro bandwidth, 8 kHz gyro rate
    Disabled = 0,
    /// 184 Hz accel / 188 Hz gyro bandwidth
    Hz188 = 1,
    /// 94 Hz accel / 98 Hz gyro bandwidth
    Hz98 = 2,
    /// 44 Hz accel / 42 Hz gyro bandwidth
    Hz42 = 3,
    /// 21 Hz accel / 20 Hz gyro bandwidth
    Hz20 = 4,
    /// 10 Hz bandwidth
    Hz10 = 5,
    /// 5 Hz bandwidth
    Hz5 = 6,
    /// Reserved pattern; keeps the gyro output rate at 8 kHz
    Reserved = 7,
}

impl DlpfMode {
    /// The 3-bit DLPF_CFG encoding
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a 3-bit DLPF_CFG field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Disabled),
            1 => Some(Self::Hz188),
            2 => Some(Self::Hz98),
            3 => Some(Self::Hz42),
            4 => Some(Self::Hz20),
            5 => Some(Self::Hz10),
            6 => Some(Self::Hz5),
            7 => Some(Self::Reserved),
            _ => None,
        }
    }

    /// Gyroscope output rate in kHz under this filter setting
    #[must_use]
    pub const fn gyro_output_rate_khz(self) -> f32 {
        match self {
            Self::Disabled | Self::Reserved => 8.0,
            _ => 1.0,
        }
    }
}
