#![cfg_attr(not(test), no_std)]

//! Core of a "typing" watch face: the time string is revealed one character
//! at a time on every minute tick, while date and step count are shown at once.
//!
//! Everything here is hardware independent. The firmware binary wires these
//! types to RP2040 alarms, a button and a MAX7219 matrix.

#[macro_use]
mod fmt;

pub mod alarm;
pub mod animator;
pub mod clock;
pub mod config;
pub mod delay;
pub mod display;
pub mod error;
pub mod field;
pub mod font;
pub mod format;
pub mod health;
pub mod orchestrator;

#[cfg(test)]
mod testing;

pub use alarm::AlarmSlot;
pub use animator::{AnimationState, Generation, RevealAnimator, Scheduler, StepOutcome, TimerHandle};
pub use clock::{WallClock, WallTime};
pub use config::{RevealTiming, WatchConfig};
pub use delay::{DelaySource, RandomDelay};
pub use display::MatrixPanel;
pub use error::{ConfigError, ScheduleError};
pub use field::{FieldController, FieldId, TextDisplay};
pub use format::{Formatter, HourFormat};
pub use health::{HealthSource, StepCounter};
pub use orchestrator::TickOrchestrator;

/// Delay type used for every timer request.
pub type Millis = fugit::MillisDurationU32;
