//! In-memory MPU-6050 stand-in for host tests.
//!
//! Models the register file with auto-incrementing burst access, records
//! every register write, and can be told to fail the next N read
//! transactions. Clones share the same device, so a test can keep a handle
//! while the driver owns another.

#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

pub const ADDRESS: u8 = 0x68;

const ACCEL_XOUT_H: usize = 0x3B;
const TEMP_OUT_H: usize = 0x41;
const GYRO_XOUT_H: usize = 0x43;
const PWR_MGMT_1: usize = 0x6B;

#[derive(Debug)]
pub struct Device {
    pub registers: [u8; 128],
    pub writes: Vec<(u8, u8)>,
    pub read_transactions: usize,
    pub fail_reads: usize,
}

#[derive(Debug, Clone)]
pub struct FakeMpu {
    address: u8,
    device: Rc<RefCell<Device>>,
}

impl FakeMpu {
    pub fn new() -> Self {
        let mut registers = [0; 128];
        // asleep after power-on
        registers[PWR_MGMT_1] = 0x40;
        Self {
            address: ADDRESS,
            device: Rc::new(RefCell::new(Device {
                registers,
                writes: Vec::new(),
                read_transactions: 0,
                fail_reads: 0,
            })),
        }
    }

    pub fn at(address: u8) -> Self {
        Self {
            address,
            ..Self::new()
        }
    }

    pub fn device(&self) -> std::cell::RefMut<'_, Device> {
        self.device.borrow_mut()
    }

    pub fn set_word(&self, register: usize, value: i16) {
        let bytes = value.to_be_bytes();
        let mut device = self.device();
        device.registers[register] = bytes[0];
        device.registers[register + 1] = bytes[1];
    }

    pub fn set_accel(&self, x: i16, y: i16, z: i16) {
        self.set_word(ACCEL_XOUT_H, x);
        self.set_word(ACCEL_XOUT_H + 2, y);
        self.set_word(ACCEL_XOUT_H + 4, z);
    }

    pub fn set_gyro(&self, x: i16, y: i16, z: i16) {
        self.set_word(GYRO_XOUT_H, x);
        self.set_word(GYRO_XOUT_H + 2, y);
        self.set_word(GYRO_XOUT_H + 4, z);
    }

    pub fn set_temperature(&self, raw: i16) {
        self.set_word(TEMP_OUT_H, raw);
    }

    pub fn fail_next_reads(&self, count: usize) {
        self.device().fail_reads = count;
    }

    pub fn register(&self, register: usize) -> u8 {
        self.device().registers[register]
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.device().writes.clone()
    }

    pub fn read_transactions(&self) -> usize {
        self.device().read_transactions
    }
}

impl ErrorType for FakeMpu {
    type Error = ErrorKind;
}

impl embedded_hal::i2c::I2c for FakeMpu {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut device = self.device.borrow_mut();
        let reads = operations
            .iter()
            .any(|op| matches!(op, Operation::Read(_)));
        if reads {
            device.read_transactions += 1;
            if device.fail_reads > 0 {
                device.fail_reads -= 1;
                return Err(ErrorKind::Other);
            }
        }

        let mut pointer = 0usize;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    if let Some((&register, values)) = bytes.split_first() {
                        pointer = register as usize;
                        for &value in values {
                            device.registers[pointer % 128] = value;
                            device.writes.push(((pointer % 128) as u8, value));
                            pointer += 1;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = device.registers[pointer % 128];
                        pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

impl embedded_hal_async::i2c::I2c for FakeMpu {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::transaction(self, address, operations)
    }
}

/// Records requested waits instead of sleeping.
#[derive(Debug, Default)]
pub struct FakeDelay {
    pub waits_ns: Vec<u32>,
}

impl FakeDelay {
    pub fn total_us(&self) -> u64 {
        self.waits_ns.iter().map(|&ns| u64::from(ns)).sum::<u64>() / 1_000
    }
}

impl embedded_hal::delay::DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(ns);
    }
}

impl embedded_hal_async::delay::DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(ns);
    }
}

/// Microsecond counter advancing by `step_us` per read, starting at `start_us`.
pub fn ticking_counter(start_us: u32, step_us: u32) -> impl FnMut() -> u32 {
    let mut now = start_us;
    move || {
        let current = now;
        now = now.wrapping_add(step_us);
        current
    }
}
