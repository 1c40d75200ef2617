//! Driver for the InvenSense MPU-6050 6-axis inertial sensor
//!
//! The driver owns a [`RegisterBus`] and caches the scale factors derived
//! from the configuration registers: gyroscope LSB/(°/s), accelerometer
//! LSB/g, and the sample rate. Every configuration change goes through
//! [`modify_register_field`](Mpu6050Driver::modify_register_field) so only
//! the named bit span of the target register is touched.

use libm::{fabsf, powf};

use crate::bitfield::{self, Bits};
use crate::interface::RegisterBus;
use crate::registers::mpu6050 as reg;
use crate::sensors::{AccelFullScale, Axis, DlpfMode, GyroFullScale, LowPowerWakeRate};
use crate::{Error, MPU6050_WHO_AM_I_VALUE};

/// Self-test pass band: response within ±14 % of the factory trim
const SELF_TEST_TOLERANCE_PCT: f32 = 14.0;

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis rotation (°/s)
    pub x: f32,
    /// Y-axis rotation (°/s)
    pub y: f32,
    /// Z-axis rotation (°/s)
    pub z: f32,
}

/// Accelerometer data in g
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration (g)
    pub x: f32,
    /// Y-axis acceleration (g)
    pub y: f32,
    /// Z-axis acceleration (g)
    pub z: f32,
}

/// Result of reading the `WHO_AM_I` register
///
/// A mismatch is an expected outcome (wrong wiring, a different part on the
/// same address), not a bus fault, so it is reported rather than raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mpu6050Identity {
    /// Raw register content
    pub value: u8,
}

impl Mpu6050Identity {
    /// Whether the register read back the MPU-6050 signature (0x68)
    #[must_use]
    pub const fn is_match(self) -> bool {
        self.value == MPU6050_WHO_AM_I_VALUE
    }
}

/// Outcome of a single-axis self-test
///
/// An out-of-tolerance response is an expected operating condition; it sets
/// [`passed`](Self::passed) to `false` but is never an `Err`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestOutcome {
    /// Tested axis
    pub axis: Axis,
    /// Self-test response: raw LSB delta between stimulated and baseline
    /// readings
    pub response: f32,
    /// Factory trim value decoded from the SELF_TEST registers (raw LSB)
    pub factory_trim: f32,
    /// Deviation of the response from the factory trim, in percent
    pub deviation_pct: f32,
    /// Whether the deviation is within the ±14 % band
    pub passed: bool,
}

/// Self-test outcomes for all three axes of one sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestReport {
    /// X-axis outcome
    pub x: SelfTestOutcome,
    /// Y-axis outcome
    pub y: SelfTestOutcome,
    /// Z-axis outcome
    pub z: SelfTestOutcome,
}

impl SelfTestReport {
    /// Whether every axis passed
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.x.passed && self.y.passed && self.z.passed
    }
}

/// Driver for one MPU-6050 device
pub struct Mpu6050Driver<B> {
    bus: B,
    gyro_lsb: f32,
    accel_lsb: f32,
    sample_rate_khz: f32,
}

impl<B> Mpu6050Driver<B>
where
    B: RegisterBus,
{
    /// Create a driver over the given bus
    ///
    /// No bus traffic happens here; the cached scale factors start at the
    /// device's power-on defaults (±250 °/s, ±2g, 8 kHz gyro output rate
    /// with a divider of 0).
    pub const fn new(bus: B) -> Self {
        Self {
            bus,
            gyro_lsb: 131.0,
            accel_lsb: 16384.0,
            sample_rate_khz: 8.0,
        }
    }

    /// Consume the driver and return the bus
    pub fn release(self) -> B {
        self.bus
    }

    // ==================== Register primitives ====================

    /// Read one register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<B::Error>> {
        Ok(self.bus.read_byte(register)?)
    }

    /// Write one register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<B::Error>> {
        Ok(self.bus.write_byte(register, value)?)
    }

    /// Read a 16-bit measurement spanning `register` (high byte) and
    /// `register + 1` (low byte), as a signed value
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_measurement(&mut self, register: u8) -> Result<i16, Error<B::Error>> {
        let high = self.bus.read_byte(register)?;
        let low = self.bus.read_byte(register + 1)?;
        Ok(bitfield::sign_extend(
            bitfield::combine_bytes(high, low),
            16,
        ))
    }

    /// Read-modify-write one register, replacing only the span of
    /// `bits.width()` bits starting `position` bits from the MSB
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the span does not fit the
    /// register, or a bus error if the transaction fails.
    pub fn modify_register_field(
        &mut self,
        register: u8,
        bits: Bits,
        position: u8,
    ) -> Result<(), Error<B::Error>> {
        let current = Bits::byte(self.bus.read_byte(register)?);
        let updated =
            bitfield::modify_span(current, bits, position).map_err(|_| Error::InvalidArgument)?;
        Ok(self.bus.write_byte(register, updated.value())?)
    }

    fn read_field(&mut self, register: u8, position: u8, width: u8) -> Result<u8, Error<B::Error>> {
        let data = Bits::byte(self.bus.read_byte(register)?);
        bitfield::extract_span(data, position, width).map_err(|_| Error::InvalidArgument)
    }

    // ==================== Identity ====================

    /// Read `WHO_AM_I` and report whether it matches the MPU-6050 signature
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. A signature
    /// mismatch is reported through the returned [`Mpu6050Identity`], not as
    /// an error.
    pub fn identify(&mut self) -> Result<Mpu6050Identity, Error<B::Error>> {
        Ok(Mpu6050Identity {
            value: self.bus.read_byte(reg::WHO_AM_I)?,
        })
    }

    // ==================== Sample rate and filtering ====================

    /// Set the sample rate divider and return the resulting rate in kHz
    ///
    /// The sample rate is the gyroscope output rate (8 kHz with the DLPF
    /// disabled, 1 kHz otherwise) divided by `1 + divider`. The computed
    /// rate is cached on the driver.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sample_rate_divider(&mut self, divider: u8) -> Result<f32, Error<B::Error>> {
        self.bus.write_byte(reg::SMPLRT_DIV, divider)?;
        let rate = self.dlpf()?.gyro_output_rate_khz() / (1.0 + f32::from(divider));
        self.sample_rate_khz = rate;
        Ok(rate)
    }

    /// Read the divider and DLPF setting and return the sample rate in kHz,
    /// refreshing the cached value
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sample_rate_khz(&mut self) -> Result<f32, Error<B::Error>> {
        let divider = self.bus.read_byte(reg::SMPLRT_DIV)?;
        let rate = self.dlpf()?.gyro_output_rate_khz() / (1.0 + f32::from(divider));
        self.sample_rate_khz = rate;
        Ok(rate)
    }

    /// The last sample rate computed from the device registers, in kHz
    #[must_use]
    pub const fn cached_sample_rate_khz(&self) -> f32 {
        self.sample_rate_khz
    }

    /// Set the digital low-pass filter mode
    ///
    /// The EXT_SYNC bits sharing the CONFIG register are left untouched.
    /// Changing the filter can change the gyroscope output rate, so the
    /// cached sample rate is refreshed.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_dlpf(&mut self, mode: DlpfMode) -> Result<(), Error<B::Error>> {
        let bits =
            Bits::new(mode.bits(), reg::DLPF_CFG_WIDTH).map_err(|_| Error::InvalidArgument)?;
        self.modify_register_field(reg::CONFIG, bits, reg::DLPF_CFG_POS)?;
        self.sample_rate_khz()?;
        Ok(())
    }

    /// Read the digital low-pass filter mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn dlpf(&mut self) -> Result<DlpfMode, Error<B::Error>> {
        let field = self.read_field(reg::CONFIG, reg::DLPF_CFG_POS, reg::DLPF_CFG_WIDTH)?;
        DlpfMode::from_bits(field).ok_or(Error::InvalidArgument)
    }

    // ==================== Full-scale configuration ====================

    /// Set the gyroscope full-scale range and cache its sensitivity
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_full_scale(&mut self, scale: GyroFullScale) -> Result<(), Error<B::Error>> {
        let bits =
            Bits::new(scale.bits(), reg::FULL_SCALE_WIDTH).map_err(|_| Error::InvalidArgument)?;
        self.modify_register_field(reg::GYRO_CONFIG, bits, reg::FULL_SCALE_POS)?;
        self.gyro_lsb = scale.sensitivity();
        Ok(())
    }

    /// Set the gyroscope full-scale range from a raw 2-bit selector
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `selector` is not in the
    /// FS_SEL table (0..=3), or a bus error if the transaction fails.
    pub fn set_gyro_full_scale_selector(&mut self, selector: u8) -> Result<(), Error<B::Error>> {
        let scale = GyroFullScale::from_bits(selector).ok_or(Error::InvalidArgument)?;
        self.set_gyro_full_scale(scale)
    }

    /// Read the gyroscope full-scale range, refreshing the cached
    /// sensitivity
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gyro_full_scale(&mut self) -> Result<GyroFullScale, Error<B::Error>> {
        let field = self.read_field(reg::GYRO_CONFIG, reg::FULL_SCALE_POS, reg::FULL_SCALE_WIDTH)?;
        let scale = GyroFullScale::from_bits(field).ok_or(Error::InvalidArgument)?;
        self.gyro_lsb = scale.sensitivity();
        Ok(scale)
    }

    /// Set the accelerometer full-scale range and cache its sensitivity
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_full_scale(&mut self, scale: AccelFullScale) -> Result<(), Error<B::Error>> {
        let bits =
            Bits::new(scale.bits(), reg::FULL_SCALE_WIDTH).map_err(|_| Error::InvalidArgument)?;
        self.modify_register_field(reg::ACCEL_CONFIG, bits, reg::FULL_SCALE_POS)?;
        self.accel_lsb = scale.sensitivity();
        Ok(())
    }

    /// Set the accelerometer full-scale range from a raw 2-bit selector
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `selector` is not in the
    /// AFS_SEL table (0..=3), or a bus error if the transaction fails.
    pub fn set_accel_full_scale_selector(&mut self, selector: u8) -> Result<(), Error<B::Error>> {
        let scale = AccelFullScale::from_bits(selector).ok_or(Error::InvalidArgument)?;
        self.set_accel_full_scale(scale)
    }

    /// Read the accelerometer full-scale range, refreshing the cached
    /// sensitivity
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_full_scale(&mut self) -> Result<AccelFullScale, Error<B::Error>> {
        let field =
            self.read_field(reg::ACCEL_CONFIG, reg::FULL_SCALE_POS, reg::FULL_SCALE_WIDTH)?;
        let scale = AccelFullScale::from_bits(field).ok_or(Error::InvalidArgument)?;
        self.accel_lsb = scale.sensitivity();
        Ok(scale)
    }

    // ==================== Power management ====================

    /// Clear the SLEEP bit, waking the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn wake(&mut self) -> Result<(), Error<B::Error>> {
        self.modify_register_field(reg::PWR_MGMT_1, Bits::flag(false), reg::SLEEP_POS)
    }

    /// Set the SLEEP bit, putting the device to sleep
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sleep(&mut self) -> Result<(), Error<B::Error>> {
        self.modify_register_field(reg::PWR_MGMT_1, Bits::flag(true), reg::SLEEP_POS)
    }

    /// Trigger a device reset
    ///
    /// All registers return to their power-on defaults; the cached scale
    /// factors are reset to match.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset(&mut self) -> Result<(), Error<B::Error>> {
        self.modify_register_field(reg::PWR_MGMT_1, Bits::flag(true), reg::RESET_POS)?;
        self.gyro_lsb = 131.0;
        self.accel_lsb = 16384.0;
        self.sample_rate_khz = 8.0;
        Ok(())
    }

    /// Disable the temperature sensor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn disable_temperature(&mut self) -> Result<(), Error<B::Error>> {
        self.modify_register_field(reg::PWR_MGMT_1, Bits::flag(true), reg::TEMP_DIS_POS)
    }

    /// Enable the temperature sensor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_temperature(&mut self) -> Result<(), Error<B::Error>> {
        self.modify_register_field(reg::PWR_MGMT_1, Bits::flag(false), reg::TEMP_DIS_POS)
    }

    /// Enable cycle mode: the device wakes at `rate` between sleeps to take
    /// a single accelerometer sample
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_cycle(&mut self, rate: LowPowerWakeRate) -> Result<(), Error<B::Error>> {
        self.modify_register_field(reg::PWR_MGMT_1, Bits::flag(true), reg::CYCLE_POS)?;
        let bits =
            Bits::new(rate.bits(), reg::LP_WAKE_CTRL_WIDTH).map_err(|_| Error::InvalidArgument)?;
        self.modify_register_field(reg::PWR_MGMT_2, bits, reg::LP_WAKE_CTRL_POS)
    }

    /// Disable cycle mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn disable_cycle(&mut self) -> Result<(), Error<B::Error>> {
        self.modify_register_field(reg::PWR_MGMT_1, Bits::flag(false), reg::CYCLE_POS)
    }

    /// Enter accelerometer-only low-power mode
    ///
    /// Cycle mode at `rate`, device awake, temperature sensor off, all gyro
    /// axes in standby (datasheet register 108 procedure).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_only_low_power_mode(
        &mut self,
        rate: LowPowerWakeRate,
    ) -> Result<(), Error<B::Error>> {
        self.enable_cycle(rate)?;
        self.wake()?;
        self.disable_temperature()?;
        self.set_gyro_standby_all(true)
    }

    /// Put one accelerometer axis into or out of standby
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_standby(&mut self, axis: Axis, standby: bool) -> Result<(), Error<B::Error>> {
        let position = match axis {
            Axis::X => 2,
            Axis::Y => 3,
            Axis::Z => 4,
        };
        self.modify_register_field(reg::PWR_MGMT_2, Bits::flag(standby), position)
    }

    /// Put one gyroscope axis into or out of standby
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_standby(&mut self, axis: Axis, standby: bool) -> Result<(), Error<B::Error>> {
        let position = match axis {
            Axis::X => 5,
            Axis::Y => 6,
            Axis::Z => 7,
        };
        self.modify_register_field(reg::PWR_MGMT_2, Bits::flag(standby), position)
    }

    /// Put all accelerometer axes into or out of standby
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_standby_all(&mut self, standby: bool) -> Result<(), Error<B::Error>> {
        for axis in Axis::ALL {
            self.set_accel_standby(axis, standby)?;
        }
        Ok(())
    }

    /// Put all gyroscope axes into or out of standby
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_standby_all(&mut self, standby: bool) -> Result<(), Error<B::Error>> {
        for axis in Axis::ALL {
            self.set_gyro_standby(axis, standby)?;
        }
        Ok(())
    }

    // ==================== Pass-through (bypass) mode ====================

    /// Enable or disable pass-through mode
    ///
    /// With pass-through enabled the auxiliary I2C bus is wired straight to
    /// the primary bus (I2C_BYPASS_EN set, I2C_MST_EN cleared), so a
    /// magnetometer behind the MPU-6050 answers at its own address.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_pass_through(&mut self, enabled: bool) -> Result<(), Error<B::Error>> {
        self.modify_register_field(reg::INT_PIN_CFG, Bits::flag(enabled), reg::I2C_BYPASS_EN_POS)?;
        self.modify_register_field(reg::USER_CTRL, Bits::flag(!enabled), reg::I2C_MST_EN_POS)
    }

    /// Whether pass-through mode is active (I2C_BYPASS_EN set and
    /// I2C_MST_EN clear)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn pass_through(&mut self) -> Result<bool, Error<B::Error>> {
        let bypass = self.read_field(reg::INT_PIN_CFG, reg::I2C_BYPASS_EN_POS, 1)? == 1;
        let master = self.read_field(reg::USER_CTRL, reg::I2C_MST_EN_POS, 1)? == 1;
        Ok(bypass && !master)
    }

    // ==================== Measurements ====================

    /// Read one gyroscope axis as a raw signed 16-bit value
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro_axis_raw(&mut self, axis: Axis) -> Result<i16, Error<B::Error>> {
        let register = match axis {
            Axis::X => reg::GYRO_XOUT_H,
            Axis::Y => reg::GYRO_YOUT_H,
            Axis::Z => reg::GYRO_ZOUT_H,
        };
        self.read_measurement(register)
    }

    /// Read one gyroscope axis in °/s, using the cached sensitivity
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro_axis(&mut self, axis: Axis) -> Result<f32, Error<B::Error>> {
        let raw = self.read_gyro_axis_raw(axis)?;
        Ok(f32::from(raw) / self.gyro_lsb)
    }

    /// Read all gyroscope axes as raw signed 16-bit values
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro_raw(&mut self) -> Result<(i16, i16, i16), Error<B::Error>> {
        Ok((
            self.read_gyro_axis_raw(Axis::X)?,
            self.read_gyro_axis_raw(Axis::Y)?,
            self.read_gyro_axis_raw(Axis::Z)?,
        ))
    }

    /// Read all gyroscope axes in °/s
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro(&mut self) -> Result<GyroDataDps, Error<B::Error>> {
        Ok(GyroDataDps {
            x: self.read_gyro_axis(Axis::X)?,
            y: self.read_gyro_axis(Axis::Y)?,
            z: self.read_gyro_axis(Axis::Z)?,
        })
    }

    /// Read one accelerometer axis as a raw signed 16-bit value
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_axis_raw(&mut self, axis: Axis) -> Result<i16, Error<B::Error>> {
        let register = match axis {
            Axis::X => reg::ACCEL_XOUT_H,
            Axis::Y => reg::ACCEL_YOUT_H,
            Axis::Z => reg::ACCEL_ZOUT_H,
        };
        self.read_measurement(register)
    }

    /// Read one accelerometer axis in g, using the cached sensitivity
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_axis(&mut self, axis: Axis) -> Result<f32, Error<B::Error>> {
        let raw = self.read_accel_axis_raw(axis)?;
        Ok(f32::from(raw) / self.accel_lsb)
    }

    /// Read all accelerometer axes as raw signed 16-bit values
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_raw(&mut self) -> Result<(i16, i16, i16), Error<B::Error>> {
        Ok((
            self.read_accel_axis_raw(Axis::X)?,
            self.read_accel_axis_raw(Axis::Y)?,
            self.read_accel_axis_raw(Axis::Z)?,
        ))
    }

    /// Read all accelerometer axes in g
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel(&mut self) -> Result<AccelDataG, Error<B::Error>> {
        Ok(AccelDataG {
            x: self.read_accel_axis(Axis::X)?,
            y: self.read_accel_axis(Axis::Y)?,
            z: self.read_accel_axis(Axis::Z)?,
        })
    }

    /// Read the die temperature in °C
    ///
    /// Conversion per the datasheet: `raw / 340 + 36.53`.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<f32, Error<B::Error>> {
        let raw = self.read_measurement(reg::TEMP_OUT_H)?;
        Ok(f32::from(raw) / 340.0 + 36.53)
    }

    // ==================== Self-test ====================

    /// Run the gyroscope self-test on one axis
    ///
    /// The full scale is forced to ±250 °/s for the test (required by the
    /// datasheet trim formula) and restored afterwards. The response is the
    /// raw LSB delta between a stimulated and a baseline reading, compared
    /// against the factory trim within ±14 %.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. An
    /// out-of-tolerance response is reported in the outcome, not as an
    /// error.
    pub fn gyro_self_test(&mut self, axis: Axis) -> Result<SelfTestOutcome, Error<B::Error>> {
        let original = self.gyro_full_scale()?;
        self.set_gyro_full_scale(GyroFullScale::Dps250)?;

        let baseline = self.read_gyro_axis_raw(axis)?;
        self.set_gyro_self_test_trigger(axis, true)?;
        let stimulated = self.read_gyro_axis_raw(axis)?;
        self.set_gyro_self_test_trigger(axis, false)?;

        self.set_gyro_full_scale(original)?;

        let response = f32::from(stimulated) - f32::from(baseline);
        let factory_trim = self.gyro_factory_trim(axis)?;
        Ok(evaluate_outcome(axis, response, factory_trim))
    }

    /// Run the gyroscope self-test on all three axes
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gyro_self_test_all(&mut self) -> Result<SelfTestReport, Error<B::Error>> {
        Ok(SelfTestReport {
            x: self.gyro_self_test(Axis::X)?,
            y: self.gyro_self_test(Axis::Y)?,
            z: self.gyro_self_test(Axis::Z)?,
        })
    }

    /// Run the accelerometer self-test on one axis
    ///
    /// The full scale is forced to ±8g for the test (required by the
    /// datasheet trim formula) and restored afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. An
    /// out-of-tolerance response is reported in the outcome, not as an
    /// error.
    pub fn accel_self_test(&mut self, axis: Axis) -> Result<SelfTestOutcome, Error<B::Error>> {
        let original = self.accel_full_scale()?;
        self.set_accel_full_scale(AccelFullScale::G8)?;

        let baseline = self.read_accel_axis_raw(axis)?;
        self.set_accel_self_test_trigger(axis, true)?;
        let stimulated = self.read_accel_axis_raw(axis)?;
        self.set_accel_self_test_trigger(axis, false)?;

        self.set_accel_full_scale(original)?;

        let response = f32::from(stimulated) - f32::from(baseline);
        let factory_trim = self.accel_factory_trim(axis)?;
        Ok(evaluate_outcome(axis, response, factory_trim))
    }

    /// Run the accelerometer self-test on all three axes
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_self_test_all(&mut self) -> Result<SelfTestReport, Error<B::Error>> {
        Ok(SelfTestReport {
            x: self.accel_self_test(Axis::X)?,
            y: self.accel_self_test(Axis::Y)?,
            z: self.accel_self_test(Axis::Z)?,
        })
    }

    fn set_gyro_self_test_trigger(
        &mut self,
        axis: Axis,
        enabled: bool,
    ) -> Result<(), Error<B::Error>> {
        let position = reg::SELF_TEST_TRIGGER_POS + axis_index(axis);
        self.modify_register_field(reg::GYRO_CONFIG, Bits::flag(enabled), position)
    }

    fn set_accel_self_test_trigger(
        &mut self,
        axis: Axis,
        enabled: bool,
    ) -> Result<(), Error<B::Error>> {
        let position = reg::SELF_TEST_TRIGGER_POS + axis_index(axis);
        self.modify_register_field(reg::ACCEL_CONFIG, Bits::flag(enabled), position)
    }

    /// Decode the 5-bit gyro factory trim and apply the datasheet formula
    /// `FT = 25 * 131 * 1.046^(TEST - 1)`, negative for Y and Z
    fn gyro_factory_trim(&mut self, axis: Axis) -> Result<f32, Error<B::Error>> {
        let register = match axis {
            Axis::X => reg::SELF_TEST_X,
            Axis::Y => reg::SELF_TEST_Y,
            Axis::Z => reg::SELF_TEST_Z,
        };
        let test = self.read_field(register, 3, 5)?;
        if test == 0 {
            return Ok(0.0);
        }
        let magnitude = 25.0 * 131.0 * powf(1.046, f32::from(test) - 1.0);
        Ok(match axis {
            Axis::X => magnitude,
            Axis::Y | Axis::Z => -magnitude,
        })
    }

    /// Decode the 5-bit accel factory trim (3 high bits in SELF_TEST_X/Y/Z,
    /// 2 low bits in the axis's SELF_TEST_A field) and apply
    /// `FT = 4096 * 0.34 * (0.92/0.34)^((TEST - 1) / 30)`
    fn accel_factory_trim(&mut self, axis: Axis) -> Result<f32, Error<B::Error>> {
        let (register, low_position) = match axis {
            Axis::X => (reg::SELF_TEST_X, 2),
            Axis::Y => (reg::SELF_TEST_Y, 4),
            Axis::Z => (reg::SELF_TEST_Z, 6),
        };
        let high = self.read_field(register, 0, 3)?;
        let low = self.read_field(reg::SELF_TEST_A, low_position, 2)?;
        let test = bitfield::combine_bits(u16::from(high), u16::from(low), 2);
        if test == 0 {
            return Ok(0.0);
        }
        #[allow(clippy::cast_precision_loss)]
        let exponent = (test as f32 - 1.0) / 30.0;
        Ok(4096.0 * 0.34 * powf(0.92 / 0.34, exponent))
    }
}

const fn axis_index(axis: Axis) -> u8 {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
        Axis::Z => 2,
    }
}

fn evaluate_outcome(axis: Axis, response: f32, factory_trim: f32) -> SelfTestOutcome {
    // A zero trim value means the part was never trimmed; the deviation is
    // not computable, so the axis reports failure.
    if factory_trim == 0.0 {
        return SelfTestOutcome {
            axis,
            response,
            factory_trim,
            deviation_pct: 100.0,
            passed: false,
        };
    }
    let deviation_pct = (response - factory_trim) / factory_trim * 100.0;
    SelfTestOutcome {
        axis,
        response,
        factory_trim,
        deviation_pct,
        passed: fabsf(deviation_pct) <= SELF_TEST_TOLERANCE_PCT,
    }
}
