//! Unit tests for the MPU-6050 gyroscope and accelerometer self-tests
//!
//! Factory trim values used below: a gyro TEST value of 1 gives
//! `25 * 131 * 1.046^0 = 3275` LSB (negated on Y and Z), and an accel TEST
//! value of 1 gives `4096 * 0.34 = 1392.64` LSB.

use crate::common::{assert_float_eq, create_mpu_driver};
use gy87::registers::mpu6050;
use gy87::sensors::{Axis, GyroFullScale};

#[test]
fn test_gyro_self_test_within_tolerance_passes() {
    let (mut driver, bus) = create_mpu_driver();
    bus.set_register(mpu6050::SELF_TEST_X, 0b0000_0001);
    bus.queue_measurements(mpu6050::GYRO_XOUT_H, &[0, 3275]);

    let outcome = driver.gyro_self_test(Axis::X).unwrap();

    assert_eq!(outcome.axis, Axis::X);
    assert_float_eq(outcome.response, 3275.0, 0.001);
    assert_float_eq(outcome.factory_trim, 3275.0, 0.001);
    assert_float_eq(outcome.deviation_pct, 0.0, 0.001);
    assert!(outcome.passed);
}

#[test]
fn test_gyro_factory_trim_negative_on_y_and_z() {
    let (mut driver, bus) = create_mpu_driver();
    bus.set_register(mpu6050::SELF_TEST_Y, 0b0000_0001);
    bus.queue_measurements(mpu6050::GYRO_YOUT_H, &[0, -3275]);

    let outcome = driver.gyro_self_test(Axis::Y).unwrap();

    assert_float_eq(outcome.factory_trim, -3275.0, 0.001);
    assert!(outcome.passed);
}

#[test]
fn test_gyro_self_test_out_of_tolerance_is_reported_not_raised() {
    let (mut driver, bus) = create_mpu_driver();
    bus.set_register(mpu6050::SELF_TEST_X, 0b0000_0001);
    bus.queue_measurements(mpu6050::GYRO_XOUT_H, &[0, 5000]);

    let outcome = driver.gyro_self_test(Axis::X).unwrap();

    assert!(!outcome.passed);
    assert_float_eq(outcome.deviation_pct, 52.67, 0.01);
}

#[test]
fn test_gyro_self_test_zero_trim_fails() {
    let (mut driver, bus) = create_mpu_driver();
    bus.queue_measurements(mpu6050::GYRO_XOUT_H, &[0, 0]);

    let outcome = driver.gyro_self_test(Axis::X).unwrap();

    assert!(!outcome.passed);
    assert_float_eq(outcome.factory_trim, 0.0, 0.001);
    assert_float_eq(outcome.deviation_pct, 100.0, 0.001);
}

#[test]
fn test_gyro_self_test_forces_and_restores_full_scale() {
    let (mut driver, bus) = create_mpu_driver();
    // FS_SEL = 2 (±1000 °/s) before the test
    bus.set_register(mpu6050::GYRO_CONFIG, 0b0001_0000);
    bus.set_register(mpu6050::SELF_TEST_X, 0b0000_0001);
    bus.queue_measurements(mpu6050::GYRO_XOUT_H, &[0, 3275]);
    bus.clear_operations();

    driver.gyro_self_test(Axis::X).unwrap();

    // Forced to ±250, trigger pulsed, then restored with the trigger clear
    assert_eq!(
        bus.writes_to(mpu6050::GYRO_CONFIG),
        vec![0b0000_0000, 0b1000_0000, 0b0000_0000, 0b0001_0000]
    );
    assert_eq!(driver.gyro_full_scale().unwrap(), GyroFullScale::Dps1000);
}

#[test]
fn test_gyro_self_test_all_axes() {
    let (mut driver, bus) = create_mpu_driver();
    bus.set_register(mpu6050::SELF_TEST_X, 0b0000_0001);
    bus.set_register(mpu6050::SELF_TEST_Y, 0b0000_0001);
    bus.set_register(mpu6050::SELF_TEST_Z, 0b0000_0001);
    bus.queue_measurements(mpu6050::GYRO_XOUT_H, &[0, 3275]);
    bus.queue_measurements(mpu6050::GYRO_YOUT_H, &[0, -3275]);
    bus.queue_measurements(mpu6050::GYRO_ZOUT_H, &[0, -3275]);

    let report = driver.gyro_self_test_all().unwrap();

    assert!(report.all_passed());
    assert_eq!(report.y.axis, Axis::Y);
}

#[test]
fn test_accel_self_test_within_tolerance_passes() {
    let (mut driver, bus) = create_mpu_driver();
    // XA_TEST = 1: high bits zero, low bits 0b01 in SELF_TEST_A[5:4]
    bus.set_register(mpu6050::SELF_TEST_A, 0b0001_0000);
    bus.queue_measurements(mpu6050::ACCEL_XOUT_H, &[0, 1393]);

    let outcome = driver.accel_self_test(Axis::X).unwrap();

    assert_float_eq(outcome.factory_trim, 1392.64, 0.01);
    assert!(outcome.passed);
}

#[test]
fn test_accel_trim_combines_high_and_low_fields() {
    let (mut driver, bus) = create_mpu_driver();
    // ZA_TEST = 0b00110: high bits 001 in SELF_TEST_Z[7:5], low bits 0b10
    // in SELF_TEST_A[1:0], so FT = 1392.64 * (0.92/0.34)^(5/30)
    bus.set_register(mpu6050::SELF_TEST_Z, 0b0010_0000);
    bus.set_register(mpu6050::SELF_TEST_A, 0b0000_0010);
    bus.queue_measurements(mpu6050::ACCEL_ZOUT_H, &[0, 1644]);

    let outcome = driver.accel_self_test(Axis::Z).unwrap();

    assert_float_eq(outcome.factory_trim, 1644.0, 1.0);
    assert!(outcome.passed);
}

#[test]
fn test_accel_self_test_forces_and_restores_full_scale() {
    let (mut driver, bus) = create_mpu_driver();
    bus.set_register(mpu6050::SELF_TEST_A, 0b0001_0000);
    bus.queue_measurements(mpu6050::ACCEL_XOUT_H, &[0, 1393]);
    bus.clear_operations();

    driver.accel_self_test(Axis::X).unwrap();

    // Forced to ±8g from the ±2g default, trigger pulsed, then restored
    assert_eq!(
        bus.writes_to(mpu6050::ACCEL_CONFIG),
        vec![0b0001_0000, 0b1001_0000, 0b0001_0000, 0b0000_0000]
    );
}

#[test]
fn test_accel_self_test_zero_trim_fails() {
    let (mut driver, bus) = create_mpu_driver();
    bus.queue_measurements(mpu6050::ACCEL_YOUT_H, &[0, 500]);

    let outcome = driver.accel_self_test(Axis::Y).unwrap();

    assert!(!outcome.passed);
    assert_float_eq(outcome.deviation_pct, 100.0, 0.001);
}
