//! Recording doubles shared by the unit tests.

use crate::animator::{Generation, Scheduler, TimerHandle};
use crate::delay::DelaySource;
use crate::error::ScheduleError;
use crate::field::{FieldId, TextDisplay};
use crate::health::HealthSource;
use crate::Millis;

#[derive(Default)]
pub struct RecordingDisplay {
    pub writes: Vec<(FieldId, String)>,
}

impl RecordingDisplay {
    pub fn texts(&self, field: FieldId) -> Vec<String> {
        self.writes
            .iter()
            .filter(|(id, _)| *id == field)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn last(&self, field: FieldId) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|(id, _)| *id == field)
            .map(|(_, text)| text.as_str())
    }
}

impl TextDisplay for RecordingDisplay {
    fn render(&mut self, field: FieldId, text: &str) {
        self.writes.push((field, text.to_owned()));
    }
}

#[derive(Default)]
pub struct RecordingScheduler {
    pub requests: Vec<(Millis, Generation)>,
    pub fail: bool,
}

impl Scheduler for RecordingScheduler {
    fn schedule(&mut self, after: Millis, generation: Generation) -> Result<TimerHandle, ScheduleError> {
        if self.fail {
            return Err(ScheduleError::Alarm);
        }
        self.requests.push((after, generation));
        Ok(TimerHandle::new(self.requests.len() as u32))
    }
}

pub struct FixedDelay(pub u32);

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Millis {
        Millis::from_ticks(self.0)
    }
}

pub struct FixedSteps(pub i32);

impl HealthSource for FixedSteps {
    fn current_step_count(&self) -> i32 {
        self.0
    }
}
