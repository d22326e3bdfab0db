//! Error types.

use core::fmt;

/// Rejected reveal timing.
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ConfigError {
    /// `min_delay` is not strictly below `max_delay`.
    EmptyDelayRange {
        /// Lower bound in milliseconds.
        min_ms: u32,
        /// Upper bound in milliseconds.
        max_ms: u32,
    },
    /// The pause before the first character is zero.
    ZeroInitialDelay,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDelayRange { min_ms, max_ms } => {
                write!(f, "delay range [{min_ms}ms, {max_ms}ms) is empty")
            }
            Self::ZeroInitialDelay => f.write_str("initial delay must be non-zero"),
        }
    }
}

/// The host scheduler could not arm a timer.
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ScheduleError {
    /// The hardware alarm rejected the countdown (out of range or busy).
    Alarm,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alarm => f.write_str("alarm could not be armed"),
        }
    }
}
