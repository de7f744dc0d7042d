//! Gyroscope bias calibration.
//!
//! The body must be held still while samples are collected. Nothing here can
//! detect motion: if the body moves, the motion is averaged into the bias and
//! every later reading is offset by it.

use crate::gyro::{Gyro, GyroBias, GyroFullScale};
use core::num::NonZeroU32;

/// Default number of stationary samples averaged into the bias
pub(crate) const SAMPLES: NonZeroU32 = match NonZeroU32::new(600) {
    Some(samples) => samples,
    None => unreachable!(),
};
/// Default pause between calibration samples
pub(crate) const DELAY_US: u32 = 2_000;

/// Calibration parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationParameters {
    /// Number of gyro readings averaged
    pub samples: NonZeroU32,
    /// Pause after each reading, in microseconds
    pub delay_us: u32,
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self {
            samples: SAMPLES,
            delay_us: DELAY_US,
        }
    }
}

impl CalibrationParameters {
    /// Change sample count
    /// (consumes and returns `Self` to be callable in a "builder-like" pattern)
    pub fn with_samples(self, samples: NonZeroU32) -> Self {
        Self { samples, ..self }
    }

    /// Change pause between samples
    /// (consumes and returns `Self` to be callable in a "builder-like" pattern)
    pub fn with_delay_us(self, delay_us: u32) -> Self {
        Self { delay_us, ..self }
    }
}

/// Running per-axis sums of raw gyro counts.
///
/// Sums are kept as integers so that long runs do not accumulate float
/// rounding error; conversion happens once, in [`BiasAccumulator::bias`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct BiasAccumulator {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub count: u32,
}

impl BiasAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, gyro: &Gyro) {
        self.x += i64::from(gyro.x());
        self.y += i64::from(gyro.y());
        self.z += i64::from(gyro.z());
        self.count = self.count.saturating_add(1);
    }

    /// Mean reading in degrees/second, or `None` before the first sample.
    pub fn bias(&self, scale: GyroFullScale) -> Option<GyroBias> {
        if self.count == 0 {
            return None;
        }
        let n = f64::from(self.count);
        let mean = |sum: i64| (sum as f64 / n) as f32 / scale.sensitivity();
        Some(GyroBias::new(mean(self.x), mean(self.y), mean(self.z)))
    }
}

/// Averages `samples` readings pulled from `source` into a bias.
///
/// Stops at the first error from `source`; no partial bias is produced.
pub fn calibrate<E>(
    mut source: impl FnMut() -> Result<Gyro, E>,
    samples: NonZeroU32,
    scale: GyroFullScale,
) -> Result<GyroBias, E> {
    let mut accumulator = BiasAccumulator::new();
    for _ in 0..samples.get() {
        accumulator.add(&source()?);
    }
    Ok(accumulator.bias(scale).unwrap_or_default())
}
