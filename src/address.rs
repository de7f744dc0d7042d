//! MPU-6050 I2C address.
//!
//! The 7-bit address is selected by the AD0 pin:
//! - GND (or floating, internal pull-down): 0x68
//! - VCC: 0x69

/// A 7-bit MPU-6050 I2C address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address(pub u8);

impl Address {
    /// AD0 tied high.
    pub const fn alternate() -> Self {
        Self(0x69)
    }
}

impl Default for Address {
    fn default() -> Self {
        Self(0x68)
    }
}

impl From<Address> for u8 {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl From<u8> for Address {
    fn from(addr: u8) -> Self {
        Self(addr)
    }
}
