#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod bitfield;
pub mod hmc5883l;
pub mod interface;
pub mod mpu6050;
pub mod registers;
pub mod sensors;

// Re-export main types
pub use bitfield::{BitFieldError, Bits};
pub use hmc5883l::{
    Hmc5883lDriver, Hmc5883lIdentity, MagDataGauss, MagReading, MagSelfTestOutcome,
    MagSelfTestReport, Status,
};
pub use interface::{I2cInterface, RegisterBus};
pub use mpu6050::{
    AccelDataG, GyroDataDps, Mpu6050Driver, Mpu6050Identity, SelfTestOutcome, SelfTestReport,
};
pub use sensors::{
    AccelFullScale, Axis, DlpfMode, GyroFullScale, LowPowerWakeRate, MagGain, MeasurementBias,
    OperatingMode, OutputRate, SampleAveraging,
};

/// MPU-6050 I2C address when AD0 pin is low (default: 0x68)
///
/// This is the most common configuration. The AD0 pin is typically pulled low
/// or left floating. Use [`I2cInterface::default()`] for this configuration.
pub const MPU6050_ADDRESS_AD0_LOW: u8 = 0x68;

/// MPU-6050 I2C address when AD0 pin is high (alternative: 0x69)
///
/// Use this address when the AD0 pin is explicitly pulled high to VDD.
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const MPU6050_ADDRESS_AD0_HIGH: u8 = 0x69;

/// HMC5883L I2C address (fixed: 0x1E)
///
/// The HMC5883L has no address pin; every device responds at 0x1E.
/// Use [`I2cInterface::magnetometer()`] for this configuration.
pub const HMC5883L_ADDRESS: u8 = 0x1E;

/// Expected value of the MPU-6050 `WHO_AM_I` register
pub const MPU6050_WHO_AM_I_VALUE: u8 = 0x68;

/// Expected values of the HMC5883L identification registers A/B/C ("H43")
pub const HMC5883L_IDENTIFICATION: [u8; 3] = [0x48, 0x34, 0x33];

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// A requested value has no encoding in the register's value table, or a
    /// bit span falls outside its register
    InvalidArgument,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
