//! Roll, pitch and yaw estimation for the InvenSense MPU-6050.
//!
//! Gyro bias is calibrated once at startup; afterwards every cycle reads one
//! accel + gyro frame, converts it to g and degrees/second, and advances a
//! complementary filter that blends gyro integration with accelerometer tilt.
//! Yaw is integrated gyro only and drifts without bound.
//!
//! Blocking (`embedded-hal`) and async (`embedded-hal-async`) drivers and
//! pipelines are provided side by side; the estimator itself does no I/O.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod accel;
pub mod address;
pub mod attitude;
pub mod calibration;
pub mod calibration_async;
pub mod calibration_blocking;
pub mod clock;
pub mod config;
pub mod error;
pub mod estimator;
pub mod gyro;
pub mod output;
pub mod pipeline;
pub mod pipeline_async;
pub mod registers;
pub mod retry;
pub mod sample;
pub mod sensor;
pub mod sensor_async;
