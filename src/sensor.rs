use crate::{
    accel::AccelFullScale,
    address::Address,
    calibration::CalibrationParameters,
    calibration_blocking::calibrate,
    error::{Error, InitError},
    gyro::{Gyro, GyroBias, GyroFullScale},
    registers::{Register, MOTION6_BURST_LEN, PWR_MGMT_1_WAKE},
    retry::RetryPolicy,
    sample::{RawSample, RAW_SAMPLE_LEN},
};
use embedded_hal::{delay, i2c::I2c};

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
    pub fn new(i2c: I, address: Address) -> Result<Self, InitError<I>> {
        let mut sensor = Self {
            i2c,
            address: address.into(),
        };

        if let Err(error) = sensor.wake() {
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

    pub(crate) fn read(&mut self, bytes: &[u8], response: &mut [u8]) -> Result<(), Error<I>> {
        self.i2c
            .write_read(self.address, bytes, response)
            .map_err(Error::WriteReadError)
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<(), Error<I>> {
        self.i2c
            .write(self.address, bytes)
            .map_err(Error::WriteError)
    }

    pub(crate) fn read_registers<'a>(
        &mut self,
        reg: Register,
        buf: &'a mut [u8],
    ) -> Result<&'a [u8], Error<I>> {
        self.read(&[reg as u8], buf)?;
        Ok(buf)
    }

    pub(crate) fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<I>> {
        self.write(&[reg as u8, value])
    }

    /// Clear the sleep bit with a single register write.
    pub fn wake(&mut self) -> Result<(), Error<I>> {
        self.write_register(Register::PwrMgmt1, PWR_MGMT_1_WAKE)
    }

    /// Read one signed big-endian word starting at `reg`.
    pub fn read_word(&mut self, reg: Register) -> Result<i16, Error<I>> {
        let mut buf = [0; 2];
        self.read_registers(reg, &mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    pub fn set_accel_full_scale(&mut self, scale: AccelFullScale) -> Result<(), Error<I>> {
        self.write_register(Register::AccelConfig, scale.register_value())
    }

    pub fn set_gyro_full_scale(&mut self, scale: GyroFullScale) -> Result<(), Error<I>> {
        self.write_register(Register::GyroConfig, scale.register_value())
    }

    /// Reads the three gyro axes with one word read each.
    pub fn gyro_words(&mut self) -> Result<Gyro, Error<I>> {
        Ok(Gyro::new(
            self.read_word(Register::GyroX_H)?,
            self.read_word(Register::GyroY_H)?,
            self.read_word(Register::GyroZ_H)?,
        ))
    }

    /// Gets the 6 degrees of freedom at once - Acceleration and Gyroscope.
    ///
    /// The device places the temperature word between the two blocks; it is
    /// read as part of the burst and dropped.
    pub fn motion6(&mut self) -> Result<RawSample, Error<I>> {
        let mut data = [0; MOTION6_BURST_LEN];
        self.read_registers(Register::AccelX_H, &mut data)?;
        Ok(RawSample::from_bytes(motion6_frame(&data)))
    }

    /// [`Mpu6050::motion6`] with bounded retries and exponential backoff.
    pub fn motion6_with_retry(
        &mut self,
        delay: &mut impl delay::DelayNs,
        policy: &RetryPolicy,
    ) -> Result<RawSample, Error<I>> {
        let attempts = policy.attempts();
        let mut failed = 0;
        loop {
            match self.motion6() {
                Ok(sample) => return Ok(sample),
                Err(error) => {
                    failed += 1;
                    if failed >= attempts {
                        error!("sample read failed {} times, giving up", failed);
                        return Err(error.into_exhausted());
                    }
                    let backoff = policy.backoff_us(failed);
                    warn!("sample read failed (attempt {}), retrying in {} us", failed, backoff);
                    delay.delay_us(backoff);
                }
            }
        }
    }

    /// Average stationary gyro readings into a bias. The device must not move.
    pub fn calibrate_gyro(
        &mut self,
        delay: &mut impl delay::DelayNs,
        parameters: &CalibrationParameters,
        scale: GyroFullScale,
    ) -> Result<GyroBias, Error<I>> {
        calibrate(self, delay, parameters, scale)
    }
}

/// Drops the temperature word from an accel + temperature + gyro burst.
pub(crate) fn motion6_frame(data: &[u8; MOTION6_BURST_LEN]) -> [u8; RAW_SAMPLE_LEN] {
    let mut frame = [0; RAW_SAMPLE_LEN];
    frame[..6].copy_from_slice(&data[..6]);
    frame[6..].copy_from_slice(&data[8..]);
    frame
}
