//! Blocking gyro bias calibration.
//!
//! Reads the gyro axes `parameters.samples` times, pausing
//! `parameters.delay_us` after each read, and averages the readings.

use crate::{
    calibration::{self, CalibrationParameters},
    error::Error,
    gyro::{GyroBias, GyroFullScale},
    sensor::Mpu6050,
};
use embedded_hal::{delay::DelayNs, i2c::I2c};

/// Collect stationary samples and compute the gyro bias
pub fn calibrate<I>(
    mpu: &mut Mpu6050<I>,
    delay: &mut impl DelayNs,
    parameters: &CalibrationParameters,
    scale: GyroFullScale,
) -> Result<GyroBias, Error<I>>
where
    I: I2c,
{
    info!("calibrating gyro over {} samples, keep still", parameters.samples.get());
    let bias = calibration::calibrate(
        || -> Result<_, Error<I>> {
            let gyro = mpu.gyro_words()?;
            delay.delay_us(parameters.delay_us);
            Ok(gyro)
        },
        parameters.samples,
        scale,
    )?;
    info!("gyro bias [deg/s]: x={} y={} z={}", bias.x(), bias.y(), bias.z());
    Ok(bias)
}
