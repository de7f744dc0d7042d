//! Error types shared by the blocking and async drivers.
//!
//! Both `embedded_hal::i2c::I2c` and `embedded_hal_async::i2c::I2c` build on
//! [`ErrorType`], so a single error type covers both.

use core::fmt::{Debug, Formatter};
use embedded_hal::i2c::ErrorType;

/// Error during construction of a driver. Hands the bus back.
pub struct InitError<I>
where
    I: ErrorType,
{
    pub i2c: I,
    pub error: Error<I>,
}

impl<I> Debug for InitError<I>
where
    I: ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.error.fmt(f)
    }
}

/// Bus failure during a sensor operation.
pub enum Error<I>
where
    I: ErrorType,
{
    /// An I2C write failed
    WriteError(I::Error),
    /// An I2C write-read failed
    WriteReadError(I::Error),
    /// Every attempt allowed by the retry policy failed; holds the last bus error
    RetriesExhausted(I::Error),
}

impl<I> Error<I>
where
    I: ErrorType,
{
    /// The underlying bus error.
    pub fn bus_error(&self) -> &I::Error {
        match self {
            Self::WriteError(e) | Self::WriteReadError(e) | Self::RetriesExhausted(e) => e,
        }
    }

    /// Wraps the bus error of `self` as a spent retry budget.
    pub(crate) fn into_exhausted(self) -> Self {
        match self {
            Self::WriteError(e) | Self::WriteReadError(e) | Self::RetriesExhausted(e) => {
                Self::RetriesExhausted(e)
            }
        }
    }
}

impl<I> Debug for Error<I>
where
    I: ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::result::Result<(), core::fmt::Error> {
        match self {
            Self::WriteReadError(e) => f.debug_tuple("WriteReadError").field(e).finish(),
            Self::WriteError(e) => f.debug_tuple("WriteError").field(e).finish(),
            Self::RetriesExhausted(e) => f.debug_tuple("RetriesExhausted").field(e).finish(),
        }
    }
}
