//! Async twin of [`crate::pipeline`]. The estimator and codec are the same
//! pure types; only bus and delay calls are awaited.

use crate::{
    attitude::AttitudeState,
    clock::{MonotonicCounter, TimeSource},
    config::Config,
    error::Error,
    estimator::AttitudeEstimator,
    gyro::GyroBias,
    retry::RetryPolicy,
    sample::SensorCodec,
    sensor_async::Mpu6050,
};
use embedded_hal_async::{delay::DelayNs, i2c::I2c};

pub struct AttitudePipeline<I, C>
where
    I: I2c,
{
    mpu: Mpu6050<I>,
    codec: SensorCodec,
    estimator: AttitudeEstimator,
    time: TimeSource<C>,
    retry: RetryPolicy,
}

impl<I, C> AttitudePipeline<I, C>
where
    I: I2c,
    C: MonotonicCounter,
{
    /// Applies the configured ranges, calibrates the gyro, seeds the
    /// estimator from one sample and starts the clock.
    pub async fn start(
        mut mpu: Mpu6050<I>,
        counter: C,
        delay: &mut impl DelayNs,
        config: &Config,
    ) -> Result<Self, Error<I>> {
        mpu.set_accel_full_scale(config.accel_scale).await?;
        mpu.set_gyro_full_scale(config.gyro_scale).await?;

        let bias = mpu
            .calibrate_gyro(delay, &config.calibration, config.gyro_scale)
            .await?;
        let codec = SensorCodec::new(config.accel_scale, config.gyro_scale, bias);

        let raw = mpu.motion6_with_retry(delay, &config.retry).await?;
        let estimator = AttitudeEstimator::seed(&codec.decode(&raw), config.alpha);

        Ok(Self {
            mpu,
            codec,
            estimator,
            time: TimeSource::new(counter),
            retry: config.retry,
        })
    }

    /// One cycle: read, convert, advance the estimate.
    pub async fn step(&mut self, delay: &mut impl DelayNs) -> Result<AttitudeState, Error<I>> {
        let raw = self.mpu.motion6_with_retry(delay, &self.retry).await?;
        let dt = self.time.elapsed();
        Ok(self.estimator.update(&self.codec.decode(&raw), dt))
    }

    pub fn attitude(&self) -> AttitudeState {
        self.estimator.state()
    }

    pub fn bias(&self) -> GyroBias {
        self.codec.bias()
    }

    /// Returns the driver and the counter, consuming the pipeline.
    pub fn release(self) -> (Mpu6050<I>, C) {
        (self.mpu, self.time.release())
    }
}
