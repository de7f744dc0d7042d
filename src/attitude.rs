//! Orientation as roll, pitch and yaw in degrees.
//!
//! Roll and pitch are tilt relative to gravity and can be recovered from the
//! accelerometer alone. Yaw has no absolute reference: it is measured from
//! wherever the estimator started and drifts with any residual gyro bias.

use crate::accel::Acceleration;

/// Orientation in degrees.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttitudeState {
    /// Rotation around X, -180 to 180
    pub roll: f32,
    /// Rotation around Y, -90 to 90 when taken from gravity
    pub pitch: f32,
    /// Rotation around Z relative to start, unbounded
    pub yaw: f32,
}

impl AttitudeState {
    pub fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Tilt implied by a gravity reading, with `yaw = 0`.
    ///
    /// - roll = atan2(ay, az)
    /// - pitch = atan2(-ax, sqrt(ay² + az²))
    ///
    /// `atan2(0, 0)` is 0, so a zero vector (free fall) yields a level
    /// attitude rather than an error.
    pub fn from_gravity(accel: &Acceleration) -> Self {
        let roll = libm::atan2f(accel.y, accel.z);
        let pitch = libm::atan2f(-accel.x, libm::sqrtf(accel.y * accel.y + accel.z * accel.z));
        Self {
            roll: roll.to_degrees(),
            pitch: pitch.to_degrees(),
            yaw: 0.0,
        }
    }
}
