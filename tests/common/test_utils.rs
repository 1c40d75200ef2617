//! Test utilities and helper functions

use crate::common::mock_bus::MockBus;
use gy87::registers::{hmc5883l, mpu6050};
use gy87::{Hmc5883lDriver, Mpu6050Driver};

/// Create an MPU-6050 driver over a fresh mock bus with a valid `WHO_AM_I`
///
/// Returns (driver, bus) where the bus is a clone sharing state with the
/// driver's copy.
pub fn create_mpu_driver() -> (Mpu6050Driver<MockBus>, MockBus) {
    let bus = MockBus::new();
    bus.set_register(mpu6050::WHO_AM_I, 0x68);
    let handle = bus.clone();
    (Mpu6050Driver::new(bus), handle)
}

/// Create an HMC5883L driver over a fresh mock bus with a valid
/// identification signature
pub fn create_mag_driver() -> (Hmc5883lDriver<MockBus>, MockBus) {
    let bus = MockBus::new();
    bus.set_register(hmc5883l::IRA, 0x48);
    bus.set_register(hmc5883l::IRB, 0x34);
    bus.set_register(hmc5883l::IRC, 0x33);
    let handle = bus.clone();
    (Hmc5883lDriver::new(bus), handle)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}
