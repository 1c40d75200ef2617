//! Unit tests for power management and pass-through mode

use crate::common::create_mpu_driver;
use gy87::registers::mpu6050;
use gy87::sensors::{Axis, LowPowerWakeRate};

#[test]
fn test_wake_clears_only_sleep_bit() {
    let (mut driver, bus) = create_mpu_driver();
    // Sleeping with temperature disabled and a clock source selected
    bus.set_register(mpu6050::PWR_MGMT_1, 0b0100_1001);

    driver.wake().unwrap();

    assert_eq!(bus.register(mpu6050::PWR_MGMT_1), 0b0000_1001);
}

#[test]
fn test_sleep_sets_only_sleep_bit() {
    let (mut driver, bus) = create_mpu_driver();
    bus.set_register(mpu6050::PWR_MGMT_1, 0b0000_1001);

    driver.sleep().unwrap();

    assert_eq!(bus.register(mpu6050::PWR_MGMT_1), 0b0100_1001);
}

#[test]
fn test_reset_sets_device_reset_bit() {
    let (mut driver, bus) = create_mpu_driver();

    driver.reset().unwrap();

    assert_eq!(bus.register(mpu6050::PWR_MGMT_1), 0b1000_0000);
}

#[test]
fn test_temperature_sensor_toggle() {
    let (mut driver, bus) = create_mpu_driver();

    driver.disable_temperature().unwrap();
    assert_eq!(bus.register(mpu6050::PWR_MGMT_1), 0b0000_1000);

    driver.enable_temperature().unwrap();
    assert_eq!(bus.register(mpu6050::PWR_MGMT_1), 0b0000_0000);
}

#[test]
fn test_enable_cycle_sets_wake_rate() {
    let (mut driver, bus) = create_mpu_driver();

    driver.enable_cycle(LowPowerWakeRate::Hz20).unwrap();

    assert_eq!(bus.register(mpu6050::PWR_MGMT_1), 0b0010_0000);
    // LP_WAKE_CTRL = 0b10 in bits [7:6]
    assert_eq!(bus.register(mpu6050::PWR_MGMT_2), 0b1000_0000);
}

#[test]
fn test_standby_bits_per_axis() {
    let (mut driver, bus) = create_mpu_driver();

    // STBY_XA is register bit 5, STBY_ZG is register bit 0
    driver.set_accel_standby(Axis::X, true).unwrap();
    assert_eq!(bus.register(mpu6050::PWR_MGMT_2), 0b0010_0000);

    driver.set_gyro_standby(Axis::Z, true).unwrap();
    assert_eq!(bus.register(mpu6050::PWR_MGMT_2), 0b0010_0001);

    driver.set_accel_standby(Axis::X, false).unwrap();
    assert_eq!(bus.register(mpu6050::PWR_MGMT_2), 0b0000_0001);
}

#[test]
fn test_standby_all_axes() {
    let (mut driver, bus) = create_mpu_driver();

    driver.set_accel_standby_all(true).unwrap();
    assert_eq!(bus.register(mpu6050::PWR_MGMT_2), 0b0011_1000);

    driver.set_gyro_standby_all(true).unwrap();
    assert_eq!(bus.register(mpu6050::PWR_MGMT_2), 0b0011_1111);

    driver.set_accel_standby_all(false).unwrap();
    driver.set_gyro_standby_all(false).unwrap();
    assert_eq!(bus.register(mpu6050::PWR_MGMT_2), 0b0000_0000);
}

#[test]
fn test_accel_only_low_power_mode() {
    let (mut driver, bus) = create_mpu_driver();

    driver
        .accel_only_low_power_mode(LowPowerWakeRate::Hz40)
        .unwrap();

    // Cycle on, sleep off, temperature off
    assert_eq!(bus.register(mpu6050::PWR_MGMT_1), 0b0010_1000);
    // Wake rate 0b11 plus all gyro axes in standby
    assert_eq!(bus.register(mpu6050::PWR_MGMT_2), 0b1100_0111);
}

#[test]
fn test_pass_through_enable() {
    let (mut driver, bus) = create_mpu_driver();
    // I2C master initially enabled
    bus.set_register(mpu6050::USER_CTRL, 0b0010_0000);

    driver.set_pass_through(true).unwrap();

    assert_eq!(bus.register(mpu6050::INT_PIN_CFG), 0b0000_0010);
    assert_eq!(bus.register(mpu6050::USER_CTRL), 0b0000_0000);
    assert!(driver.pass_through().unwrap());
}

#[test]
fn test_pass_through_disable() {
    let (mut driver, bus) = create_mpu_driver();
    bus.set_register(mpu6050::INT_PIN_CFG, 0b0000_0010);

    driver.set_pass_through(false).unwrap();

    assert_eq!(bus.register(mpu6050::INT_PIN_CFG), 0b0000_0000);
    assert_eq!(bus.register(mpu6050::USER_CTRL), 0b0010_0000);
    assert!(!driver.pass_through().unwrap());
}
