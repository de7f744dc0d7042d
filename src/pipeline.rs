//! Blocking attitude pipeline: sensor, codec, time source and estimator
//! wired together.
//!
//! A pipeline only exists once calibration and seeding have finished, so a
//! reading can never reach the estimator uncorrected or before it is seeded.
//!
//! ```ignore
//! let mpu = Mpu6050::new(i2c, config.address)?;
//! let mut pipeline = AttitudePipeline::start(mpu, counter, &mut delay, &config)?;
//! loop {
//!     let attitude = pipeline.step(&mut delay)?;
//!     write_attitude(&mut uart, &attitude)?;
//!     delay.delay_us(5_000);
//! }
//! ```

use crate::{
    attitude::AttitudeState,
    clock::{MonotonicCounter, TimeSource},
    config::Config,
    error::Error,
    estimator::AttitudeEstimator,
    gyro::GyroBias,
    retry::RetryPolicy,
    sample::SensorCodec,
    sensor::Mpu6050,
};
use embedded_hal::{delay::DelayNs, i2c::I2c};

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
    ///
    /// The device must be still until this returns.
    pub fn start(
        mut mpu: Mpu6050<I>,
        counter: C,
        delay: &mut impl DelayNs,
        config: &Config,
    ) -> Result<Self, Error<I>> {
        mpu.set_accel_full_scale(config.accel_scale)?;
        mpu.set_gyro_full_scale(config.gyro_scale)?;
        debug!(
            "full-scale ranges: accel {} counts/g, gyro {} counts/dps",
            config.accel_scale.sensitivity(),
            config.gyro_scale.sensitivity()
        );

        let bias = mpu.calibrate_gyro(delay, &config.calibration, config.gyro_scale)?;
        let codec = SensorCodec::new(config.accel_scale, config.gyro_scale, bias);

        let raw = mpu.motion6_with_retry(delay, &config.retry)?;
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
    ///
    /// On error the estimate is left untouched and the elapsed time keeps
    /// accumulating into the next successful step.
    pub fn step(&mut self, delay: &mut impl DelayNs) -> Result<AttitudeState, Error<I>> {
        let raw = self.mpu.motion6_with_retry(delay, &self.retry)?;
        let dt = self.time.elapsed();
        let sample = self.codec.decode(&raw);
        let attitude = self.estimator.update(&sample, dt);
        trace!(
            "dt={} roll={} pitch={} yaw={}",
            dt,
            attitude.roll,
            attitude.pitch,
            attitude.yaw
        );
        Ok(attitude)
    }

    /// Latest estimate, without touching the device.
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
