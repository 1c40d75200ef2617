//! Bus interface for the GY-87 sensors
//!
//! The drivers talk to the outside world through the [`RegisterBus`] trait:
//! single-byte register reads and writes against one device address. The
//! [`I2cInterface`] implementation wraps any `embedded-hal` 1.0 blocking I2C
//! peripheral; tests substitute an in-memory mock.

use crate::{HMC5883L_ADDRESS, MPU6050_ADDRESS_AD0_HIGH, MPU6050_ADDRESS_AD0_LOW};

/// Byte-level register access against a single device
///
/// Every driver operation is one or more blocking calls through this trait;
/// there is no timeout, retry, or cancellation. A failed transaction (NACK,
/// bus fault) surfaces as `Self::Error` and is propagated by the drivers
/// without interpretation.
pub trait RegisterBus {
    /// Underlying bus error type
    type Error;

    /// Read one byte from `register`
    fn read_byte(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Write one byte to `register`
    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;
}

/// I2C implementation of [`RegisterBus`]
///
/// Owns the I2C peripheral together with the 7-bit device address, so a
/// driver never has to carry the address separately.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create an interface for the MPU-6050 at its default address
    /// (0x68, AD0 pin LOW)
    ///
    /// This is the most common configuration; the AD0 pin is typically
    /// pulled low or left floating.
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: MPU6050_ADDRESS_AD0_LOW,
        }
    }

    /// Create an interface for the MPU-6050 at its alternative address
    /// (0x69, AD0 pin HIGH)
    ///
    /// Use this when the AD0 pin is explicitly pulled high to VDD.
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: MPU6050_ADDRESS_AD0_HIGH,
        }
    }

    /// Create an interface for the HMC5883L (fixed address 0x1E)
    ///
    /// When the magnetometer sits behind the MPU-6050's auxiliary bus, the
    /// MPU-6050 must be in pass-through mode before this address responds;
    /// see [`Mpu6050Driver::set_pass_through`](crate::Mpu6050Driver::set_pass_through).
    pub const fn magnetometer(i2c: I2C) -> Self {
        Self {
            i2c,
            address: HMC5883L_ADDRESS,
        }
    }

    /// Create an interface with a custom device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit device address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterBus for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;

    fn read_byte(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buffer)?;
        Ok(buffer[0])
    }

    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }
}
