//! Driver for the Honeywell HMC5883L 3-axis magnetometer
//!
//! The driver owns a [`RegisterBus`] and caches the digital resolution
//! (LSB/Ga) selected by configuration register B. Raw readings of −4096 are
//! the device's saturation sentinel and surface as
//! [`MagReading::Overflow`], never as an error.

use libm::fabsf;

use crate::bitfield::{self, Bits};
use crate::interface::RegisterBus;
use crate::registers::hmc5883l as reg;
use crate::sensors::{Axis, MagGain, MeasurementBias, OperatingMode, OutputRate, SampleAveraging};
use crate::{Error, HMC5883L_IDENTIFICATION};

/// Raw value the device reports when a measurement overflows or a sensor
/// bridge is saturated
pub const OVERFLOW_RAW: i16 = -4096;

/// Self-test pass band: bias response within ±14 % of the expected field
const SELF_TEST_TOLERANCE_PCT: f32 = 14.0;
/// Expected positive-bias excitation on X and Y at the self-test gain
const SELF_TEST_EXPECTED_XY_GAUSS: f32 = 1.16;
/// Expected positive-bias excitation on Z at the self-test gain
const SELF_TEST_EXPECTED_Z_GAUSS: f32 = 1.08;
/// Gain the self-test runs at (4.7 Ga range, 390 LSB/Ga)
const SELF_TEST_GAIN: MagGain = MagGain::Ga4_7;

/// One axis of magnetic field data
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagReading {
    /// Field strength in gauss
    Field(f32),
    /// The sensor saturated; the reading carries no field information
    Overflow,
}

impl MagReading {
    /// The field in gauss, or `None` on overflow
    #[must_use]
    pub const fn gauss(self) -> Option<f32> {
        match self {
            Self::Field(value) => Some(value),
            Self::Overflow => None,
        }
    }

    /// Whether this reading is the overflow sentinel
    #[must_use]
    pub const fn is_overflow(self) -> bool {
        matches!(self, Self::Overflow)
    }
}

/// Magnetic field data for all three axes, overflow-aware
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagDataGauss {
    /// X-axis field
    pub x: MagReading,
    /// Y-axis field
    pub y: MagReading,
    /// Z-axis field
    pub z: MagReading,
}

/// Status register content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// New data is ready in the output registers
    pub ready: bool,
    /// The output registers are locked until all six are read
    pub locked: bool,
}

/// Result of reading the identification registers
///
/// A mismatch is an expected outcome (wrong wiring, a clone part), not a bus
/// fault, so it is reported rather than raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hmc5883lIdentity {
    /// Raw contents of identification registers A, B, C
    pub values: [u8; 3],
}

impl Hmc5883lIdentity {
    /// Whether the registers read back the HMC5883L signature ("H43")
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.values[0] == HMC5883L_IDENTIFICATION[0]
            && self.values[1] == HMC5883L_IDENTIFICATION[1]
            && self.values[2] == HMC5883L_IDENTIFICATION[2]
    }
}

/// Outcome of the self-test for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagSelfTestOutcome {
    /// Tested axis
    pub axis: Axis,
    /// Measured positive-bias response in gauss
    pub response_gauss: f32,
    /// Expected excitation for this axis in gauss
    pub expected_gauss: f32,
    /// Deviation of the response from the expected excitation, in percent
    pub deviation_pct: f32,
    /// Whether the deviation is within the ±14 % band
    pub passed: bool,
}

/// Self-test outcomes for all three axes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagSelfTestReport {
    /// X-axis outcome
    pub x: MagSelfTestOutcome,
    /// Y-axis outcome
    pub y: MagSelfTestOutcome,
    /// Z-axis outcome
    pub z: MagSelfTestOutcome,
}

impl MagSelfTestReport {
    /// Whether every axis passed
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.x.passed && self.y.passed && self.z.passed
    }
}

/// Driver for one HMC5883L device
pub struct Hmc5883lDriver<B> {
    bus: B,
    lsb_per_gauss: f32,
}

impl<B> Hmc5883lDriver<B>
where
    B: RegisterBus,
{
    /// Create a driver over the given bus
    ///
    /// No bus traffic happens here; the cached resolution starts at the
    /// device's power-on default gain (±1.3 Ga, 1090 LSB/Ga).
    pub const fn new(bus: B) -> Self {
        Self {
            bus,
            lsb_per_gauss: 1090.0,
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

    // ==================== Identity and status ====================

    /// Read the identification registers and report whether they match the
    /// HMC5883L signature
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. A signature
    /// mismatch is reported through the returned [`Hmc5883lIdentity`], not
    /// as an error.
    pub fn identify(&mut self) -> Result<Hmc5883lIdentity, Error<B::Error>> {
        Ok(Hmc5883lIdentity {
            values: [
                self.bus.read_byte(reg::IRA)?,
                self.bus.read_byte(reg::IRB)?,
                self.bus.read_byte(reg::IRC)?,
            ],
        })
    }

    /// Read the status register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn status(&mut self) -> Result<Status, Error<B::Error>> {
        let value = self.bus.read_byte(reg::SR)?;
        Ok(Status {
            ready: value & 0b01 != 0,
            locked: value & 0b10 != 0,
        })
    }

    // ==================== Configuration ====================

    /// Set the number of samples averaged per output (MA field of CRA)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sample_averaging(
        &mut self,
        averaging: SampleAveraging,
    ) -> Result<(), Error<B::Error>> {
        let bits = Bits::new(averaging.bits(), reg::SAMPLE_AVERAGING_WIDTH)
            .map_err(|_| Error::InvalidArgument)?;
        self.modify_register_field(reg::CRA, bits, reg::SAMPLE_AVERAGING_POS)
    }

    /// Read the sample averaging setting
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sample_averaging(&mut self) -> Result<SampleAveraging, Error<B::Error>> {
        let field = self.read_field(
            reg::CRA,
            reg::SAMPLE_AVERAGING_POS,
            reg::SAMPLE_AVERAGING_WIDTH,
        )?;
        SampleAveraging::from_bits(field).ok_or(Error::InvalidArgument)
    }

    /// Set the continuous-mode output rate (DO field of CRA)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_output_rate(&mut self, rate: OutputRate) -> Result<(), Error<B::Error>> {
        let bits =
            Bits::new(rate.bits(), reg::OUTPUT_RATE_WIDTH).map_err(|_| Error::InvalidArgument)?;
        self.modify_register_field(reg::CRA, bits, reg::OUTPUT_RATE_POS)
    }

    /// Read the output rate
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the field holds the reserved
    /// pattern `0b111`, or a bus error if the transaction fails.
    pub fn output_rate(&mut self) -> Result<OutputRate, Error<B::Error>> {
        let field = self.read_field(reg::CRA, reg::OUTPUT_RATE_POS, reg::OUTPUT_RATE_WIDTH)?;
        OutputRate::from_bits(field).ok_or(Error::InvalidArgument)
    }

    /// Set the measurement bias mode (MS field of CRA)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_measurement_bias(&mut self, bias: MeasurementBias) -> Result<(), Error<B::Error>> {
        let bits = Bits::new(bias.bits(), reg::MEASUREMENT_BIAS_WIDTH)
            .map_err(|_| Error::InvalidArgument)?;
        self.modify_register_field(reg::CRA, bits, reg::MEASUREMENT_BIAS_POS)
    }

    /// Read the measurement bias mode
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the field holds the reserved
    /// pattern `0b11`, or a bus error if the transaction fails.
    pub fn measurement_bias(&mut self) -> Result<MeasurementBias, Error<B::Error>> {
        let field = self.read_field(
            reg::CRA,
            reg::MEASUREMENT_BIAS_POS,
            reg::MEASUREMENT_BIAS_WIDTH,
        )?;
        MeasurementBias::from_bits(field).ok_or(Error::InvalidArgument)
    }

    /// Set the gain (GN field of CRB) and cache its resolution
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gain(&mut self, gain: MagGain) -> Result<(), Error<B::Error>> {
        let bits = Bits::new(gain.bits(), reg::GAIN_WIDTH).map_err(|_| Error::InvalidArgument)?;
        self.modify_register_field(reg::CRB, bits, reg::GAIN_POS)?;
        self.lsb_per_gauss = gain.lsb_per_gauss();
        Ok(())
    }

    /// Set the gain from a raw 3-bit selector
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `selector` is not in the GN
    /// table (0..=7), or a bus error if the transaction fails.
    pub fn set_gain_selector(&mut self, selector: u8) -> Result<(), Error<B::Error>> {
        let gain = MagGain::from_bits(selector).ok_or(Error::InvalidArgument)?;
        self.set_gain(gain)
    }

    /// Read the gain, refreshing the cached resolution
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gain(&mut self) -> Result<MagGain, Error<B::Error>> {
        let field = self.read_field(reg::CRB, reg::GAIN_POS, reg::GAIN_WIDTH)?;
        let gain = MagGain::from_bits(field).ok_or(Error::InvalidArgument)?;
        self.lsb_per_gauss = gain.lsb_per_gauss();
        Ok(gain)
    }

    /// Set the operating mode (MD field of the mode register)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), Error<B::Error>> {
        let bits = Bits::new(mode.bits(), reg::OPERATING_MODE_WIDTH)
            .map_err(|_| Error::InvalidArgument)?;
        self.modify_register_field(reg::MR, bits, reg::OPERATING_MODE_POS)
    }

    /// Read the operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn operating_mode(&mut self) -> Result<OperatingMode, Error<B::Error>> {
        let field = self.read_field(reg::MR, reg::OPERATING_MODE_POS, reg::OPERATING_MODE_WIDTH)?;
        OperatingMode::from_bits(field).ok_or(Error::InvalidArgument)
    }

    // ==================== Measurements ====================

    /// Read one axis as a raw signed 16-bit value
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_axis_raw(&mut self, axis: Axis) -> Result<i16, Error<B::Error>> {
        let register = match axis {
            Axis::X => reg::DXRA,
            Axis::Y => reg::DYRA,
            Axis::Z => reg::DZRA,
        };
        self.read_measurement(register)
    }

    /// Read one axis in gauss, using the cached resolution
    ///
    /// A raw value of −4096 is the device's saturation sentinel and returns
    /// [`MagReading::Overflow`] instead of a scaled field.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_axis(&mut self, axis: Axis) -> Result<MagReading, Error<B::Error>> {
        let raw = self.read_axis_raw(axis)?;
        if raw == OVERFLOW_RAW {
            return Ok(MagReading::Overflow);
        }
        Ok(MagReading::Field(f32::from(raw) / self.lsb_per_gauss))
    }

    /// Read all axes as raw signed 16-bit values
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_mag_raw(&mut self) -> Result<(i16, i16, i16), Error<B::Error>> {
        Ok((
            self.read_axis_raw(Axis::X)?,
            self.read_axis_raw(Axis::Y)?,
            self.read_axis_raw(Axis::Z)?,
        ))
    }

    /// Read all axes in gauss
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_mag(&mut self) -> Result<MagDataGauss, Error<B::Error>> {
        Ok(MagDataGauss {
            x: self.read_axis(Axis::X)?,
            y: self.read_axis(Axis::Y)?,
            z: self.read_axis(Axis::Z)?,
        })
    }

    // ==================== Self-test ====================

    /// Run the positive-bias self-test on all three axes
    ///
    /// The gain is forced to ±4.7 Ga (390 LSB/Ga, the gain the datasheet
    /// excitation values are given for) and a baseline single measurement is
    /// taken with normal bias, then one with positive bias. The per-axis
    /// response is compared against the expected excitation (X/Y 1.16 Ga,
    /// Z 1.08 Ga) within ±14 %. Gain and bias are restored afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. An
    /// out-of-tolerance or saturated axis is reported in the outcome, not
    /// as an error.
    pub fn self_test(&mut self) -> Result<MagSelfTestReport, Error<B::Error>> {
        let original_gain = self.gain()?;
        let original_bias = self.measurement_bias()?;

        self.set_gain(SELF_TEST_GAIN)?;
        self.set_measurement_bias(MeasurementBias::Normal)?;
        self.set_operating_mode(OperatingMode::Single)?;
        let baseline = self.read_mag_raw()?;

        self.set_measurement_bias(MeasurementBias::PositiveBias)?;
        self.set_operating_mode(OperatingMode::Single)?;
        let biased = self.read_mag_raw()?;

        self.set_measurement_bias(original_bias)?;
        self.set_gain(original_gain)?;

        Ok(MagSelfTestReport {
            x: evaluate_axis(
                Axis::X,
                baseline.0,
                biased.0,
                SELF_TEST_EXPECTED_XY_GAUSS,
            ),
            y: evaluate_axis(
                Axis::Y,
                baseline.1,
                biased.1,
                SELF_TEST_EXPECTED_XY_GAUSS,
            ),
            z: evaluate_axis(Axis::Z, baseline.2, biased.2, SELF_TEST_EXPECTED_Z_GAUSS),
        })
    }
}

fn evaluate_axis(axis: Axis, baseline: i16, biased: i16, expected_gauss: f32) -> MagSelfTestOutcome {
    let response_gauss =
        (f32::from(biased) - f32::from(baseline)) / SELF_TEST_GAIN.lsb_per_gauss();

    // A saturated reading carries no field information; the axis fails.
    if baseline == OVERFLOW_RAW || biased == OVERFLOW_RAW {
        return MagSelfTestOutcome {
            axis,
            response_gauss,
            expected_gauss,
            deviation_pct: 100.0,
            passed: false,
        };
    }

    let deviation_pct = (response_gauss - expected_gauss) / expected_gauss * 100.0;
    MagSelfTestOutcome {
        axis,
        response_gauss,
        expected_gauss,
        deviation_pct,
        passed: fabsf(deviation_pct) <= SELF_TEST_TOLERANCE_PCT,
    }
}
