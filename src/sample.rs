//! Per-cycle samples and the raw-to-physical conversion.
//!
//! A [`RawSample`] is the 12-byte accel + gyro frame as the bus delivers it;
//! [`SensorCodec::decode`] turns it into a [`SensorSample`] in g and
//! degrees/second with the gyro bias already removed.

use crate::{
    accel::{Accel, AccelFullScale, Acceleration},
    gyro::{AngularRate, Gyro, GyroBias, GyroFullScale},
};

/// Size of one accel + gyro frame on the wire.
pub const RAW_SAMPLE_LEN: usize = 12;

/// Six raw axes as read from the device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct RawSample {
    pub accel: Accel,
    pub gyro: Gyro,
}

impl RawSample {
    pub fn new(accel: Accel, gyro: Gyro) -> Self {
        Self { accel, gyro }
    }

    /// Decodes a frame of six big-endian signed 16-bit words, MSB first, in
    /// the order accel X, Y, Z then gyro X, Y, Z.
    pub fn from_bytes(data: [u8; RAW_SAMPLE_LEN]) -> Self {
        Self {
            accel: Accel::from_bytes([data[0], data[1], data[2], data[3], data[4], data[5]]),
            gyro: Gyro::from_bytes([data[6], data[7], data[8], data[9], data[10], data[11]]),
        }
    }
}

/// One sample in physical units, gyro bias-corrected.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSample {
    /// Linear acceleration in g
    pub accel: Acceleration,
    /// Angular rate in degrees/second
    pub gyro: AngularRate,
}

impl SensorSample {
    pub fn new(accel: Acceleration, gyro: AngularRate) -> Self {
        Self { accel, gyro }
    }
}

/// Converts raw frames to physical units.
///
/// Owns the gyro bias for the rest of the run; the bias cannot be changed
/// once the codec is built.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct SensorCodec {
    accel_scale: AccelFullScale,
    gyro_scale: GyroFullScale,
    bias: GyroBias,
}

impl SensorCodec {
    pub fn new(accel_scale: AccelFullScale, gyro_scale: GyroFullScale, bias: GyroBias) -> Self {
        Self {
            accel_scale,
            gyro_scale,
            bias,
        }
    }

    pub fn bias(&self) -> GyroBias {
        self.bias
    }

    /// Pure conversion: accel counts / sensitivity, gyro counts / sensitivity
    /// minus bias. Cannot fail.
    pub fn decode(&self, raw: &RawSample) -> SensorSample {
        let accel = raw.accel.scaled(self.accel_scale);
        let rate = raw.gyro.scaled(self.gyro_scale);
        SensorSample {
            accel,
            gyro: AngularRate {
                x: rate.x - self.bias.x(),
                y: rate.y - self.bias.y(),
                z: rate.z - self.bias.z(),
            },
        }
    }
}
