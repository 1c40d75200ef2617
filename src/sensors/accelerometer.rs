//! Accelerometer configuration values for the MPU-6050

/// Accelerometer full-scale range (AFS_SEL field of ACCEL_CONFIG)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2g range (most sensitive, least range)
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    G16 = 3,
}

impl AccelFullScale {
    /// The 2-bit AFS_SEL encoding
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a 2-bit AFS_SEL field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::G2),
            1 => Some(Self::G4),
            2 => Some(Self::G8),
            3 => Some(Self::G16),
            _ => None,
        }
    }

    /// Sensitivity in LSB/g
    ///
    /// Raw 16-bit readings divide by this to give acceleration in g.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::G2 => 16384.0,
            Self::G4 => 8192.0,
            Self::G8 => 4096.0,
            Self::G16 => 2048.0,
        }
    }

    /// Maximum measurable acceleration in g
    #[must_use]
    pub const fn max_value_g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }
}
