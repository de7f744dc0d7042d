//! Bounded retry with exponential backoff for bus reads.

/// Default number of attempts per read (the first try included)
pub(crate) const MAX_ATTEMPTS: u8 = 3;
/// Default wait after the first failed attempt
pub(crate) const INITIAL_BACKOFF_US: u32 = 500;
/// Default upper bound on a single wait
pub(crate) const MAX_BACKOFF_US: u32 = 4_000;

/// How often, and how patiently, a failed bus read is retried.
///
/// The wait doubles after every failed attempt, starting at
/// `initial_backoff_us` and saturating at `max_backoff_us`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryPolicy {
    /// Total attempts, the first one included. Zero behaves like one.
    pub max_attempts: u8,
    pub initial_backoff_us: u32,
    pub max_backoff_us: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            initial_backoff_us: INITIAL_BACKOFF_US,
            max_backoff_us: MAX_BACKOFF_US,
        }
    }
}

impl RetryPolicy {
    /// A single attempt, no retries.
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff_us: 0,
            max_backoff_us: 0,
        }
    }

    /// Change attempt count
    /// (consumes and returns `Self` to be callable in a "builder-like" pattern)
    pub fn with_max_attempts(self, max_attempts: u8) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }

    /// Change backoff bounds
    /// (consumes and returns `Self` to be callable in a "builder-like" pattern)
    pub fn with_backoff_us(self, initial_backoff_us: u32, max_backoff_us: u32) -> Self {
        Self {
            initial_backoff_us,
            max_backoff_us,
            ..self
        }
    }

    pub(crate) fn attempts(&self) -> u8 {
        self.max_attempts.max(1)
    }

    /// Wait before retrying after `failed` attempts have failed (`failed >= 1`).
    pub fn backoff_us(&self, failed: u8) -> u32 {
        let shift = u32::from(failed.saturating_sub(1)).min(31);
        self.initial_backoff_us
            .saturating_mul(1 << shift)
            .min(self.max_backoff_us)
    }
}
