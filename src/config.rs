//! Attitude pipeline configuration.
//!
//! Every tuning constant of the pipeline lives here:
//! - Device address and full-scale ranges (which fix the sensitivities)
//! - Complementary filter weight
//! - Calibration sample count and pacing
//! - Bus retry policy

use crate::{
    accel::AccelFullScale, address::Address, calibration::CalibrationParameters,
    gyro::GyroFullScale, retry::RetryPolicy,
};

/// Default complementary filter weight given to gyro integration.
pub const DEFAULT_ALPHA: f32 = 0.98;

/// Configuration, built once at startup and handed to the pipeline.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Device I2C address
    pub address: Address,
    /// Accelerometer range; its sensitivity converts counts to g
    pub accel_scale: AccelFullScale,
    /// Gyroscope range; its sensitivity converts counts to degrees/second
    pub gyro_scale: GyroFullScale,
    /// Weight of the gyro-integrated estimate in the roll/pitch blend, in `[0, 1]`.
    ///
    /// The crossover time constant is about `dt * alpha / (1 - alpha)`:
    /// 0.98 at 200 Hz gives roughly 0.25 s.
    pub alpha: f32,
    /// Gyro bias calibration
    pub calibration: CalibrationParameters,
    /// Retries for per-cycle sample reads
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: Address::default(),
            accel_scale: AccelFullScale::default(),
            gyro_scale: GyroFullScale::default(),
            alpha: DEFAULT_ALPHA,
            calibration: CalibrationParameters::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Change device address
    /// (consumes and returns `Self` to be callable in a "builder-like" pattern)
    pub fn with_address(self, address: Address) -> Self {
        Self { address, ..self }
    }

    /// Change both full-scale ranges
    /// (consumes and returns `Self` to be callable in a "builder-like" pattern)
    pub fn with_scales(self, accel_scale: AccelFullScale, gyro_scale: GyroFullScale) -> Self {
        Self {
            accel_scale,
            gyro_scale,
            ..self
        }
    }

    /// Change filter weight, clamped to `[0, 1]` (NaN falls back to the default)
    /// (consumes and returns `Self` to be callable in a "builder-like" pattern)
    pub fn with_alpha(self, alpha: f32) -> Self {
        let alpha = if alpha.is_nan() {
            DEFAULT_ALPHA
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Self { alpha, ..self }
    }

    /// Change calibration parameters
    /// (consumes and returns `Self` to be callable in a "builder-like" pattern)
    pub fn with_calibration(self, calibration: CalibrationParameters) -> Self {
        Self {
            calibration,
            ..self
        }
    }

    /// Change retry policy
    /// (consumes and returns `Self` to be callable in a "builder-like" pattern)
    pub fn with_retry(self, retry: RetryPolicy) -> Self {
        Self { retry, ..self }
    }
}
