//! Unit tests for device identification

use crate::common::{create_mag_driver, create_mpu_driver};
use gy87::registers::{hmc5883l, mpu6050};

#[test]
fn test_mpu_identity_matches() {
    let (mut driver, _bus) = create_mpu_driver();

    let identity = driver.identify().unwrap();
    assert_eq!(identity.value, 0x68);
    assert!(identity.is_match());
}

#[test]
fn test_mpu_identity_mismatch_is_reported_not_raised() {
    let (mut driver, bus) = create_mpu_driver();
    bus.set_register(mpu6050::WHO_AM_I, 0x34);

    let identity = driver.identify().unwrap();
    assert_eq!(identity.value, 0x34);
    assert!(!identity.is_match());
}

#[test]
fn test_mag_identity_matches() {
    let (mut driver, _bus) = create_mag_driver();

    let identity = driver.identify().unwrap();
    assert_eq!(identity.values, [0x48, 0x34, 0x33]);
    assert!(identity.is_match());
}

#[test]
fn test_mag_identity_partial_mismatch_is_reported_not_raised() {
    let (mut driver, bus) = create_mag_driver();
    // Registers A and B read correctly, C does not
    bus.set_register(hmc5883l::IRC, 0x00);

    let identity = driver.identify().unwrap();
    assert_eq!(identity.values, [0x48, 0x34, 0x00]);
    assert!(!identity.is_match());
}
