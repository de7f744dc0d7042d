use crate::{
    calibration::{BiasAccumulator, CalibrationParameters},
    error::Error,
    gyro::{GyroBias, GyroFullScale},
    sensor_async::Mpu6050,
};
use embedded_hal_async::{delay::DelayNs, i2c::I2c};

/// Collect stationary samples and compute the gyro bias
pub async fn calibrate<I>(
    mpu: &mut Mpu6050<I>,
    delay: &mut impl DelayNs,
    parameters: &CalibrationParameters,
    scale: GyroFullScale,
) -> Result<GyroBias, Error<I>>
where
    I: I2c,
{
    info!("calibrating gyro over {} samples, keep still", parameters.samples.get());
    let mut accumulator = BiasAccumulator::new();

    for _ in 0..parameters.samples.get() {
        accumulator.add(&mpu.gyro_words().await?);
        delay.delay_us(parameters.delay_us).await;
    }

    let bias = accumulator.bias(scale).unwrap_or_default();
    info!("gyro bias [deg/s]: x={} y={} z={}", bias.x(), bias.y(), bias.z());
    Ok(bias)
}
