//! Register maps for the MPU-6050 and HMC5883L
//!
//! Named addresses plus the bit-span location (MSB-relative position and
//! width, as used by [`bitfield`](crate::bitfield)) of every configuration
//! field the drivers touch. The enumerated value tables that fill these
//! fields live in [`sensors`](crate::sensors).

/// MPU-6050 register map
///
/// Addresses follow the register map revision 4.2 of the MPU-6000/MPU-6050
/// datasheet. All registers are 8 bits wide; 16-bit measurements span a
/// high-byte register and the low-byte register immediately after it.
pub mod mpu6050 {
    /// SELF_TEST_X - XA_TEST high bits in \[7:5\], XG_TEST in \[4:0\]
    pub const SELF_TEST_X: u8 = 0x0D;
    /// SELF_TEST_Y - YA_TEST high bits in \[7:5\], YG_TEST in \[4:0\]
    pub const SELF_TEST_Y: u8 = 0x0E;
    /// SELF_TEST_Z - ZA_TEST high bits in \[7:5\], ZG_TEST in \[4:0\]
    pub const SELF_TEST_Z: u8 = 0x0F;
    /// SELF_TEST_A - low 2 bits of XA_TEST \[5:4\], YA_TEST \[3:2\], ZA_TEST \[1:0\]
    pub const SELF_TEST_A: u8 = 0x10;

    /// SMPLRT_DIV - sample rate divider; rate = gyro output rate / (1 + div)
    pub const SMPLRT_DIV: u8 = 0x19;
    /// CONFIG - external sync (EXT_SYNC_SET \[5:3\]) and DLPF (DLPF_CFG \[2:0\])
    pub const CONFIG: u8 = 0x1A;
    /// GYRO_CONFIG - per-axis self-test triggers \[7:5\] and FS_SEL \[4:3\]
    pub const GYRO_CONFIG: u8 = 0x1B;
    /// ACCEL_CONFIG - per-axis self-test triggers \[7:5\] and AFS_SEL \[4:3\]
    pub const ACCEL_CONFIG: u8 = 0x1C;

    /// INT_PIN_CFG - interrupt pin / bypass configuration (I2C_BYPASS_EN bit 1)
    pub const INT_PIN_CFG: u8 = 0x37;

    /// ACCEL_XOUT_H - accelerometer X high byte (low byte at 0x3C)
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    /// ACCEL_YOUT_H - accelerometer Y high byte
    pub const ACCEL_YOUT_H: u8 = 0x3D;
    /// ACCEL_ZOUT_H - accelerometer Z high byte
    pub const ACCEL_ZOUT_H: u8 = 0x3F;
    /// TEMP_OUT_H - temperature high byte
    pub const TEMP_OUT_H: u8 = 0x41;
    /// GYRO_XOUT_H - gyroscope X high byte
    pub const GYRO_XOUT_H: u8 = 0x43;
    /// GYRO_YOUT_H - gyroscope Y high byte
    pub const GYRO_YOUT_H: u8 = 0x45;
    /// GYRO_ZOUT_H - gyroscope Z high byte
    pub const GYRO_ZOUT_H: u8 = 0x47;

    /// USER_CTRL - user control (I2C_MST_EN bit 5)
    pub const USER_CTRL: u8 = 0x6A;
    /// PWR_MGMT_1 - device reset, sleep, cycle, temperature disable, clock select
    pub const PWR_MGMT_1: u8 = 0x6B;
    /// PWR_MGMT_2 - wake control \[7:6\] and per-axis standby bits \[5:0\]
    pub const PWR_MGMT_2: u8 = 0x6C;
    /// WHO_AM_I - device identity, reads 0x68
    pub const WHO_AM_I: u8 = 0x75;

    /// MSB-relative position of DEVICE_RESET in PWR_MGMT_1 (register bit 7)
    pub const RESET_POS: u8 = 0;
    /// MSB-relative position of SLEEP in PWR_MGMT_1 (register bit 6)
    pub const SLEEP_POS: u8 = 1;
    /// MSB-relative position of CYCLE in PWR_MGMT_1 (register bit 5)
    pub const CYCLE_POS: u8 = 2;
    /// MSB-relative position of TEMP_DIS in PWR_MGMT_1 (register bit 3)
    pub const TEMP_DIS_POS: u8 = 4;

    /// MSB-relative position of LP_WAKE_CTRL in PWR_MGMT_2 (register bits 7:6)
    pub const LP_WAKE_CTRL_POS: u8 = 0;
    /// LP_WAKE_CTRL width in bits
    pub const LP_WAKE_CTRL_WIDTH: u8 = 2;

    /// MSB-relative position of FS_SEL / AFS_SEL (register bits 4:3)
    pub const FULL_SCALE_POS: u8 = 3;
    /// FS_SEL / AFS_SEL width in bits
    pub const FULL_SCALE_WIDTH: u8 = 2;

    /// MSB-relative position of the per-axis self-test triggers
    /// (register bits 7:5; X first)
    pub const SELF_TEST_TRIGGER_POS: u8 = 0;

    /// MSB-relative position of DLPF_CFG in CONFIG (register bits 2:0)
    pub const DLPF_CFG_POS: u8 = 5;
    /// DLPF_CFG width in bits
    pub const DLPF_CFG_WIDTH: u8 = 3;

    /// MSB-relative position of I2C_BYPASS_EN in INT_PIN_CFG (register bit 1)
    pub const I2C_BYPASS_EN_POS: u8 = 6;
    /// MSB-relative position of I2C_MST_EN in USER_CTRL (register bit 5)
    pub const I2C_MST_EN_POS: u8 = 2;
}

/// HMC5883L register map
///
/// The data-register ordering (X at 0x03, Y at 0x05, Z at 0x07) follows the
/// register map this driver was built against; each axis is a high byte
/// followed by its low byte.
pub mod hmc5883l {
    /// Configuration register A - averaging (MA \[6:5\]), output rate
    /// (DO \[4:2\]), measurement bias (MS \[1:0\])
    pub const CRA: u8 = 0x00;
    /// Configuration register B - gain (GN \[7:5\])
    pub const CRB: u8 = 0x01;
    /// Mode register - operating mode (MD \[1:0\])
    pub const MR: u8 = 0x02;
    /// X-axis data high byte
    pub const DXRA: u8 = 0x03;
    /// X-axis data low byte
    pub const DXRB: u8 = 0x04;
    /// Y-axis data high byte
    pub const DYRA: u8 = 0x05;
    /// Y-axis data low byte
    pub const DYRB: u8 = 0x06;
    /// Z-axis data high byte
    pub const DZRA: u8 = 0x07;
    /// Z-axis data low byte
    pub const DZRB: u8 = 0x08;
    /// Status register - LOCK (bit 1), RDY (bit 0)
    pub const SR: u8 = 0x09;
    /// Identification register A, reads 0x48 ('H')
    pub const IRA: u8 = 0x0A;
    /// Identification register B, reads 0x34 ('4')
    pub const IRB: u8 = 0x0B;
    /// Identification register C, reads 0x33 ('3')
    pub const IRC: u8 = 0x0C;

    /// MSB-relative position of MA in CRA (register bits 6:5)
    pub const SAMPLE_AVERAGING_POS: u8 = 1;
    /// MA width in bits
    pub const SAMPLE_AVERAGING_WIDTH: u8 = 2;
    /// MSB-relative position of DO in CRA (register bits 4:2)
    pub const OUTPUT_RATE_POS: u8 = 3;
    /// DO width in bits
    pub const OUTPUT_RATE_WIDTH: u8 = 3;
    /// MSB-relative position of MS in CRA (register bits 1:0)
    pub const MEASUREMENT_BIAS_POS: u8 = 6;
    /// MS width in bits
    pub const MEASUREMENT_BIAS_WIDTH: u8 = 2;
    /// MSB-relative position of GN in CRB (register bits 7:5)
    pub const GAIN_POS: u8 = 0;
    /// GN width in bits
    pub const GAIN_WIDTH: u8 = 3;
    /// MSB-relative position of MD in MR (register bits 1:0)
    pub const OPERATING_MODE_POS: u8 = 6;
    /// MD width in bits
    pub const OPERATING_MODE_WIDTH: u8 = 2;
}
