//! Elapsed-time source for the update loop.
//!
//! Hardware microsecond counters are usually 32 bits wide and wrap after about
//! 71.6 minutes. Deltas are taken with wrapping subtraction, which stays
//! correct across one wrap as long as consecutive reads are less than a full
//! counter period apart.

/// A free-running, monotonic microsecond counter.
pub trait MonotonicCounter {
    /// Current counter value. May wrap from `u32::MAX` to 0.
    fn now_us(&mut self) -> u32;
}

impl<F> MonotonicCounter for F
where
    F: FnMut() -> u32,
{
    fn now_us(&mut self) -> u32 {
        self()
    }
}

/// Measures the time between consecutive calls to [`TimeSource::elapsed`].
#[derive(Debug)]
pub struct TimeSource<C> {
    counter: C,
    last_us: u32,
}

impl<C> TimeSource<C>
where
    C: MonotonicCounter,
{
    /// Starts measuring from the counter's current value.
    pub fn new(mut counter: C) -> Self {
        let last_us = counter.now_us();
        Self { counter, last_us }
    }

    /// Microseconds since the previous call (or since construction).
    pub fn elapsed_us(&mut self) -> u32 {
        let now = self.counter.now_us();
        let delta = now.wrapping_sub(self.last_us);
        self.last_us = now;
        delta
    }

    /// Seconds since the previous call (or since construction). Never negative.
    pub fn elapsed(&mut self) -> f32 {
        self.elapsed_us() as f32 * 1e-6
    }

    /// Counter value recorded by the last call.
    pub fn last_us(&self) -> u32 {
        self.last_us
    }

    /// Returns the counter, consuming this time source.
    pub fn release(self) -> C {
        self.counter
    }
}
