//! Step count source.

use crate::clock::WallTime;

pub trait HealthSource {
    /// Steps taken today. Zero when nothing is known.
    fn current_step_count(&self) -> i32;
}

impl<T: HealthSource + ?Sized> HealthSource for &T {
    fn current_step_count(&self) -> i32 {
        (**self).current_step_count()
    }
}

/// Pedometer fed by discrete step events, reset at the start of each day.
#[derive(Debug, Default)]
pub struct StepCounter {
    steps: i32,
    /// (year, month, day) the count belongs to.
    day: Option<(u16, u8, u8)>,
}

impl StepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
        trace!("step {}", self.steps);
    }

    /// Zeroes the count when `now` falls on a different day than the last sync.
    /// Returns true if a reset happened.
    pub fn sync_day(&mut self, now: &WallTime) -> bool {
        let today = (now.year, now.month, now.day);
        match self.day.replace(today) {
            Some(day) if day != today => {
                info!("new day, resetting {} steps", self.steps);
                self.steps = 0;
                true
            }
            _ => false,
        }
    }
}

impl HealthSource for StepCounter {
    fn current_step_count(&self) -> i32 {
        self.steps
    }
}
