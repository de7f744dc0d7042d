//! Complementary-filter attitude estimator.
//!
//! Each update blends two roll/pitch estimates:
//! - gyro integration: smooth, but drifts with bias error
//! - accelerometer tilt: drift-free, but disturbed by vibration and linear
//!   acceleration
//!
//! `angle = alpha * (prev + rate * dt) + (1 - alpha) * accel_angle`
//!
//! With weights summing to one this is a high-pass on the gyro path and a
//! low-pass on the accelerometer path with the same crossover. Yaw has no
//! accelerometer counterpart and is a pure open-loop integrator.
//!
//! The estimator is a plain state transition: it does no I/O and keeps no
//! clock, so any scheduler can drive it.

use crate::{attitude::AttitudeState, sample::SensorSample};

#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct AttitudeEstimator {
    state: AttitudeState,
    alpha: f32,
}

impl AttitudeEstimator {
    /// Starts from the accelerometer-only tilt of `sample`, with yaw at zero.
    pub fn seed(sample: &SensorSample, alpha: f32) -> Self {
        let state = AttitudeState::from_gravity(&sample.accel);
        debug!(
            "estimator seeded: roll={} pitch={} alpha={}",
            state.roll,
            state.pitch,
            alpha
        );
        Self { state, alpha }
    }

    /// Advances the estimate by `dt` seconds and returns the new attitude.
    pub fn update(&mut self, sample: &SensorSample, dt: f32) -> AttitudeState {
        let accel = AttitudeState::from_gravity(&sample.accel);

        let roll_gyro = self.state.roll + sample.gyro.x * dt;
        let pitch_gyro = self.state.pitch + sample.gyro.y * dt;

        self.state = AttitudeState {
            roll: self.blend(roll_gyro, accel.roll),
            pitch: self.blend(pitch_gyro, accel.pitch),
            yaw: self.state.yaw + sample.gyro.z * dt,
        };
        self.state
    }

    fn blend(&self, gyro: f32, accel: f32) -> f32 {
        self.alpha * gyro + (1.0 - self.alpha) * accel
    }

    pub fn state(&self) -> AttitudeState {
        self.state
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}
