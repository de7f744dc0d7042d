mod common;

use common::{ticking_counter, FakeDelay, FakeMpu, ADDRESS};
use mpu6050_attitude::{
    address::Address,
    calibration::CalibrationParameters,
    config::Config,
    error::Error,
    output::{parse_line, write_attitude},
    pipeline::AttitudePipeline,
    retry::RetryPolicy,
    sensor::Mpu6050,
};
use std::num::NonZeroU32;

const EPS: f32 = 1e-5;

fn level_fake() -> FakeMpu {
    let fake = FakeMpu::new();
    fake.set_accel(0, 0, 16384);
    fake.set_gyro(0, 0, 0);
    fake.set_temperature(3990);
    fake
}

fn quick_config() -> Config {
    Config::default().with_calibration(
        CalibrationParameters::default()
            .with_samples(NonZeroU32::new(50).unwrap())
            .with_delay_us(0),
    )
}

#[test]
fn test_level_and_still_end_to_end() {
    let fake = level_fake();
    let mut delay = FakeDelay::default();
    let config = Config::default();

    let mpu = Mpu6050::new(fake.clone(), Address::default()).unwrap();
    let mut pipeline =
        AttitudePipeline::start(mpu, ticking_counter(0, 5_000), &mut delay, &config).unwrap();

    let bias = pipeline.bias();
    assert_eq!((bias.x(), bias.y(), bias.z()), (0.0, 0.0, 0.0));

    let seeded = pipeline.attitude();
    assert_eq!((seeded.roll, seeded.pitch, seeded.yaw), (0.0, 0.0, 0.0));

    for _ in 0..40 {
        let attitude = pipeline.step(&mut delay).unwrap();
        assert!(attitude.roll.abs() < EPS);
        assert!(attitude.pitch.abs() < EPS);
        assert!(attitude.yaw.abs() < EPS);
    }

    // 600 calibration samples of three word reads, one seed burst, 40 bursts
    assert_eq!(fake.read_transactions(), 600 * 3 + 1 + 40);
}

#[test]
fn test_startup_writes() {
    let fake = level_fake();
    let mut delay = FakeDelay::default();

    let mpu = Mpu6050::new(fake.clone(), Address::default()).unwrap();
    assert_eq!(fake.register(0x6B), 0x00);

    let config = quick_config().with_scales(
        mpu6050_attitude::accel::AccelFullScale::G4,
        mpu6050_attitude::gyro::GyroFullScale::Deg500,
    );
    let _pipeline =
        AttitudePipeline::start(mpu, ticking_counter(0, 5_000), &mut delay, &config).unwrap();

    assert_eq!(fake.writes(), vec![(0x6B, 0x00), (0x1C, 0x08), (0x1B, 0x08)]);
}

#[test]
fn test_calibration_paces_samples() {
    let fake = level_fake();
    let mut delay = FakeDelay::default();
    let config = Config::default().with_calibration(
        CalibrationParameters::default()
            .with_samples(NonZeroU32::new(10).unwrap())
            .with_delay_us(2_000),
    );

    let mpu = Mpu6050::new(fake, Address::default()).unwrap();
    AttitudePipeline::start(mpu, ticking_counter(0, 5_000), &mut delay, &config).unwrap();

    assert_eq!(delay.waits_ns, vec![2_000_000; 10]);
}

#[test]
fn test_bias_is_removed_and_yaw_integrates_the_rest() {
    let fake = level_fake();
    fake.set_gyro(131, -262, 13);
    let mut delay = FakeDelay::default();

    let mpu = Mpu6050::new(fake.clone(), Address::default()).unwrap();
    let mut pipeline =
        AttitudePipeline::start(mpu, ticking_counter(0, 5_000), &mut delay, &quick_config())
            .unwrap();

    let bias = pipeline.bias();
    assert!((bias.x() - 1.0).abs() < EPS);
    assert!((bias.y() + 2.0).abs() < EPS);
    assert!((bias.z() - 13.0 / 131.0).abs() < EPS);

    // the stationary offset alone must not move the estimate
    for _ in 0..20 {
        let attitude = pipeline.step(&mut delay).unwrap();
        assert!(attitude.roll.abs() < 1e-4);
        assert!(attitude.pitch.abs() < 1e-4);
        assert!(attitude.yaw.abs() < 1e-4);
    }

    // +1 deg/s around Z on top of the bias, for 40 cycles of 5 ms
    fake.set_gyro(131, -262, 13 + 131);
    for _ in 0..40 {
        pipeline.step(&mut delay).unwrap();
    }
    assert!((pipeline.attitude().yaw - 0.2).abs() < 1e-4);
}

#[test]
fn test_counter_wrap_keeps_dt_positive() {
    let fake = level_fake();
    fake.set_gyro(0, 0, 131);
    let mut delay = FakeDelay::default();
    let config = quick_config();

    let mpu = Mpu6050::new(fake.clone(), Address::default()).unwrap();
    let mut pipeline = AttitudePipeline::start(
        mpu,
        ticking_counter(u32::MAX - 12_000, 5_000),
        &mut delay,
        &config,
    )
    .unwrap();

    // the calibrated bias cancels the constant rate, so switch to a real rotation
    fake.set_gyro(0, 0, 262);
    let mut yaw = 0.0;
    for _ in 0..6 {
        let next = pipeline.step(&mut delay).unwrap().yaw;
        assert!(next > yaw, "yaw went from {} to {}", yaw, next);
        yaw = next;
    }
    assert!((yaw - 6.0 * 0.005).abs() < 1e-4);
}

#[test]
fn test_seed_from_tilted_gravity() {
    let fake = FakeMpu::new();
    // 30 degrees of roll: ay = sin 30 = 0.5 g, az = cos 30 g
    fake.set_accel(0, 8192, 14189);
    let mut delay = FakeDelay::default();

    let mpu = Mpu6050::new(fake, Address::default()).unwrap();
    let pipeline =
        AttitudePipeline::start(mpu, ticking_counter(0, 5_000), &mut delay, &quick_config())
            .unwrap();

    let attitude = pipeline.attitude();
    assert!((attitude.roll - 30.0).abs() < 0.01);
    assert!(attitude.pitch.abs() < 0.01);
    assert_eq!(attitude.yaw, 0.0);
}

#[test]
fn test_transient_bus_failure_is_retried() {
    let fake = level_fake();
    let mut delay = FakeDelay::default();
    let config = quick_config().with_retry(RetryPolicy::default().with_backoff_us(500, 4_000));

    let mpu = Mpu6050::new(fake.clone(), Address::default()).unwrap();
    let mut pipeline =
        AttitudePipeline::start(mpu, ticking_counter(0, 5_000), &mut delay, &config).unwrap();

    delay.waits_ns.clear();
    fake.fail_next_reads(2);
    pipeline.step(&mut delay).unwrap();
    assert_eq!(delay.waits_ns, vec![500_000, 1_000_000]);
}

#[test]
fn test_persistent_bus_failure_surfaces() {
    let fake = level_fake();
    fake.set_gyro(0, 0, 0);
    let mut delay = FakeDelay::default();

    let mpu = Mpu6050::new(fake.clone(), Address::default()).unwrap();
    let mut pipeline =
        AttitudePipeline::start(mpu, ticking_counter(0, 5_000), &mut delay, &quick_config())
            .unwrap();
    let before = pipeline.attitude();

    fake.fail_next_reads(3);
    let reads = fake.read_transactions();
    match pipeline.step(&mut delay) {
        Err(Error::RetriesExhausted(_)) => {}
        other => panic!("expected exhausted retries, got {:?}", other),
    }
    assert_eq!(fake.read_transactions(), reads + 3);
    assert_eq!(pipeline.attitude(), before);

    // the bus recovered
    assert!(pipeline.step(&mut delay).is_ok());
}

#[test]
fn test_calibration_failure_aborts_start() {
    let fake = level_fake();
    fake.fail_next_reads(1);
    let mut delay = FakeDelay::default();

    let mpu = Mpu6050::new(fake, Address::default()).unwrap();
    let result =
        AttitudePipeline::start(mpu, ticking_counter(0, 5_000), &mut delay, &quick_config());
    assert!(matches!(result, Err(Error::WriteReadError(_))));
}

#[test]
fn test_absent_device_returns_bus() {
    let fake = FakeMpu::at(0x69);
    match Mpu6050::new(fake, Address(ADDRESS)) {
        Err(error) => {
            assert!(matches!(error.error, Error::WriteError(_)));
            let _bus: FakeMpu = error.i2c;
        }
        Ok(_) => panic!("no device answers at 0x68"),
    }
}

#[test]
fn test_stream_output_reads_back() {
    let fake = level_fake();
    let mut delay = FakeDelay::default();

    let mpu = Mpu6050::new(fake, Address::default()).unwrap();
    let mut pipeline =
        AttitudePipeline::start(mpu, ticking_counter(0, 5_000), &mut delay, &quick_config())
            .unwrap();

    let mut buf = [0u8; 256];
    let mut cursor: &mut [u8] = &mut buf;
    for _ in 0..3 {
        let attitude = pipeline.step(&mut delay).unwrap();
        write_attitude(&mut cursor, &attitude).unwrap();
    }
    let written = 256 - cursor.len();
    let text = std::str::from_utf8(&buf[..written]).unwrap();

    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines, vec!["0.000,0.000,0.000"; 3]);
    for line in lines {
        let parsed = parse_line(line).unwrap();
        assert_eq!((parsed.pitch, parsed.roll, parsed.yaw), (0.0, 0.0, 0.0));
    }

    let (mpu, _counter) = pipeline.release();
    let _bus: FakeMpu = mpu.release();
}
