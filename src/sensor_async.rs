//! MPU6050 Asynchronous Driver Implementation
//!
//! Mirrors the blocking driver in `sensor.rs` on top of `embedded-hal-async`,
//! for use from an async executor. Only the transport changes: register
//! layout, frame decoding and retry behaviour are the same.

use crate::{
    accel::AccelFullScale,
    address::Address,
    calibration::CalibrationParameters,
    calibration_async::calibrate,
    error::{Error, InitError},
    gyro::{Gyro, GyroBias, GyroFullScale},
    registers::{Register, MOTION6_BURST_LEN, PWR_MGMT_1_WAKE},
    retry::RetryPolicy,
    sample::RawSample,
    sensor::motion6_frame,
};

use embedded_hal_async::{delay, i2c::I2c};

/// InvenSense MPU-6050 Driver
pub struct Mpu6050<I>
where
    I: I2c,
{
    i2c: I,
    address: u8,
}

impl<I> Mpu6050<I>
where
    I: I2c,
{
    /// Construct a new i2c driver for the MPU-6050 and wake the device.
    pub async fn new(i2c: I, address: Address) -> Result<Self, InitError<I>> {
        let mut sensor = Self {
            i2c,
            address: address.into(),
        };

        if let Err(error) = sensor.wake().await {
            Err(InitError {
                error,
                i2c: sensor.i2c,
            })
        } else {
            info!("mpu6050 at {} awake", sensor.address);
            Ok(sensor)
        }
    }

    /// Returns the underlying I2C peripheral, consuming this driver.
    pub fn release(self) -> I {
        self.i2c
    }

    pub(crate) async fn read(&mut self, bytes: &[u8], response: &mut [u8]) -> Result<(), Error<I>> {
        self.i2c
            .write_read(self.address, bytes, response)
            .await
            .map_err(Error::WriteReadError)
    }

    pub(crate) async fn write(&mut self, bytes: &[u8]) -> Result<(), Error<I>> {
        self.i2c
            .write(self.address, bytes)
            .await
            .map_err(Error::WriteError)
    }

    pub(crate) async fn read_registers<'a>(
        &mut self,
        reg: Register,
        buf: &'a mut [u8],
    ) -> Result<&'a [u8], Error<I>> {
        self.read(&[reg as u8], buf).await?;
        Ok(buf)
    }

    pub(crate) async fn write_register(
        &mut self,
        reg: Register,
        value: u8,
    ) -> Result<(), Error<I>> {
        self.write(&[reg as u8, value]).await
    }

    /// Clear the sleep bit with a single register write.
    pub async fn wake(&mut self) -> Result<(), Error<I>> {
        self.write_register(Register::PwrMgmt1, PWR_MGMT_1_WAKE)
            .await
    }

    /// Read one signed big-endian word starting at `reg`.
    pub async fn read_word(&mut self, reg: Register) -> Result<i16, Error<I>> {
        let mut buf = [0; 2];
        self.read_registers(reg, &mut buf).await?;
        Ok(i16::from_be_bytes(buf))
    }

    pub async fn set_accel_full_scale(&mut self, scale: AccelFullScale) -> Result<(), Error<I>> {
        self.write_register(Register::AccelConfig, scale.register_value())
            .await
    }

    pub async fn set_gyro_full_scale(&mut self, scale: GyroFullScale) -> Result<(), Error<I>> {
        self.write_register(Register::GyroConfig, scale.register_value())
            .await
    }

    /// Reads the three gyro axes with one word read each.
    pub async fn gyro_words(&mut self) -> Result<Gyro, Error<I>> {
        let x = self.read_word(Register::GyroX_H).await?;
        let y = self.read_word(Register::GyroY_H).await?;
        let z = self.read_word(Register::GyroZ_H).await?;
        Ok(Gyro::new(x, y, z))
    }

    /// Gets the 6 degrees of freedom at once - Acceleration and Gyroscope.
    /// The interleaved temperature word is dropped.
    pub async fn motion6(&mut self) -> Result<RawSample, Error<I>> {
        let mut data = [0; MOTION6_BURST_LEN];
        self.read_registers(Register::AccelX_H, &mut data).await?;
        Ok(RawSample::from_bytes(motion6_frame(&data)))
    }

    /// [`Mpu6050::motion6`] with bounded retries and exponential backoff.
    pub async fn motion6_with_retry(
        &mut self,
        delay: &mut impl delay::DelayNs,
        policy: &RetryPolicy,
    ) -> Result<RawSample, Error<I>> {
        let attempts = policy.attempts();
        let mut failed = 0;
        loop {
            match self.motion6().await {
                Ok(sample) => return Ok(sample),
                Err(error) => {
                    failed += 1;
                    if failed >= attempts {
                        error!("sample read failed {} times, giving up", failed);
                        return Err(error.into_exhausted());
                    }
                    let backoff = policy.backoff_us(failed);
                    warn!("sample read failed (attempt {}), retrying in {} us", failed, backoff);
                    delay.delay_us(backoff).await;
                }
            }
        }
    }

    /// Average stationary gyro readings into a bias. The device must not move.
    pub async fn calibrate_gyro(
        &mut self,
        delay: &mut impl delay::DelayNs,
        parameters: &CalibrationParameters,
        scale: GyroFullScale,
    ) -> Result<GyroBias, Error<I>> {
        calibrate(self, delay, parameters, scale).await
    }
}
