//! MPU-6050 register map (the subset this crate touches).
//!
//! All 16-bit quantities are stored as two consecutive registers, high byte
//! first, and the device auto-increments the register pointer during burst
//! reads.

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Register {
    /// Gyroscope configuration (0x1B), `FS_SEL` in bits 4:3
    GyroConfig = 0x1B,
    /// Accelerometer configuration (0x1C), `AFS_SEL` in bits 4:3
    AccelConfig = 0x1C,

    // Accelerometer data
    AccelX_H = 0x3B,
    AccelX_L = 0x3C,
    AccelY_H = 0x3D,
    AccelY_L = 0x3E,
    AccelZ_H = 0x3F,
    AccelZ_L = 0x40,

    // Temperature, sits between the accelerometer and gyroscope blocks
    Temp_H = 0x41,
    Temp_L = 0x42,

    // Gyroscope data
    GyroX_H = 0x43,
    GyroX_L = 0x44,
    GyroY_H = 0x45,
    GyroY_L = 0x46,
    GyroZ_H = 0x47,
    GyroZ_L = 0x48,

    /// Power management 1 (0x6B), bit 6 is `SLEEP`
    PwrMgmt1 = 0x6B,
}

/// Length of the accel + temperature + gyro burst starting at [`Register::AccelX_H`].
pub(crate) const MOTION6_BURST_LEN: usize = 14;

/// Written to [`Register::PwrMgmt1`] to leave sleep mode with the internal oscillator.
pub(crate) const PWR_MGMT_1_WAKE: u8 = 0x00;
