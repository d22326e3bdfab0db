//! Compile-time configuration of the watch face.

use fugit::ExtU32;

use crate::clock::WallTime;
use crate::error::ConfigError;
use crate::format::HourFormat;
use crate::Millis;

/// Pacing of a reveal cycle.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct RevealTiming {
    min_delay: Millis,
    max_delay: Millis,
    initial_delay: Millis,
}

impl RevealTiming {
    /// 200ms to 700ms between characters, 500ms before the first one.
    pub const DEFAULT: Self = Self {
        min_delay: Millis::from_ticks(200),
        max_delay: Millis::from_ticks(700),
        initial_delay: Millis::from_ticks(500),
    };

    /// Per-character delays are drawn from `[min_delay, max_delay)`.
    pub fn new(min_delay: Millis, max_delay: Millis, initial_delay: Millis) -> Result<Self, ConfigError> {
        if min_delay >= max_delay {
            return Err(ConfigError::EmptyDelayRange {
                min_ms: min_delay.to_millis(),
                max_ms: max_delay.to_millis(),
            });
        }
        if initial_delay.to_millis() == 0 {
            return Err(ConfigError::ZeroInitialDelay);
        }
        Ok(Self {
            min_delay,
            max_delay,
            initial_delay,
        })
    }

    /// Convenience constructor taking plain milliseconds.
    pub fn from_millis(min_ms: u32, max_ms: u32, initial_ms: u32) -> Result<Self, ConfigError> {
        Self::new(min_ms.millis(), max_ms.millis(), initial_ms.millis())
    }

    pub fn min_delay(&self) -> Millis {
        self.min_delay
    }

    pub fn max_delay(&self) -> Millis {
        self.max_delay
    }

    pub fn initial_delay(&self) -> Millis {
        self.initial_delay
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything the firmware needs to bring the face up.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct WatchConfig {
    pub timing: RevealTiming,
    pub hour_format: HourFormat,
    /// Wall time the clock starts from at boot (there is no RTC battery).
    pub start: WallTime,
}

impl WatchConfig {
    pub const DEFAULT: Self = Self {
        timing: RevealTiming::DEFAULT,
        hour_format: HourFormat::TwentyFour,
        start: WallTime {
            year: 2024,
            month: 1,
            day: 1,
            hours: 12,
            mins: 34,
            secs: 56,
        },
    };
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
