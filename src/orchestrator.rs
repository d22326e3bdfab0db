//! Minute tick handling: recompute every field, animate only the time.

use crate::animator::{Generation, Scheduler, StepOutcome};
use crate::clock::WallTime;
use crate::config::RevealTiming;
use crate::delay::DelaySource;
use crate::field::{FieldController, FieldId, TextDisplay};
use crate::format::{Formatter, DATE_LEN, STEPS_LEN, TIME_LEN};
use crate::health::HealthSource;

pub type TimeField<D> = FieldController<D, TIME_LEN>;

pub struct TickOrchestrator<D> {
    formatter: Formatter,
    time: TimeField<D>,
}

impl<D: DelaySource> TickOrchestrator<D> {
    pub fn new(formatter: Formatter, timing: &RevealTiming, delays: D) -> Self {
        Self {
            formatter,
            time: FieldController::new(FieldId::Time, timing.initial_delay(), delays),
        }
    }

    /// Handles one clock tick.
    ///
    /// The time field restarts its reveal (superseding any unfinished one);
    /// date and steps are written straight to the display.
    pub fn on_tick<H, V, S>(&mut self, now: &WallTime, health: &H, display: &mut V, scheduler: &mut S)
    where
        H: HealthSource + ?Sized,
        V: TextDisplay + ?Sized,
        S: Scheduler + ?Sized,
    {
        let steps = health.current_step_count();
        info!("tick {=u8}:{=u8}, {} steps", now.hours, now.mins, steps);

        let mut time_buf = [0u8; TIME_LEN];
        let mut date_buf = [0u8; DATE_LEN];
        let mut steps_buf = [0u8; STEPS_LEN];
        let time = self.formatter.format_time(now, &mut time_buf);
        let date = self.formatter.format_date(now, &mut date_buf);
        let steps = self.formatter.format_step_count(steps, &mut steps_buf);

        match time {
            Ok(time) => self.time.refresh(time, display, scheduler),
            Err(_) => warn!("time string overflowed, keeping previous"),
        }
        match date {
            Ok(date) => display.render(FieldId::Date, date),
            Err(_) => warn!("date string overflowed, keeping previous"),
        }
        match steps {
            Ok(steps) => display.render(FieldId::Steps, steps),
            Err(_) => warn!("step string overflowed, keeping previous"),
        }
    }

    /// Forwards a reveal timer expiry to the time field.
    pub fn on_timer_fired<V, S>(&mut self, fired: Generation, display: &mut V, scheduler: &mut S) -> StepOutcome
    where
        V: TextDisplay + ?Sized,
        S: Scheduler + ?Sized,
    {
        self.time.on_timer_fired(fired, display, scheduler)
    }

    pub fn time_field(&self) -> &TimeField<D> {
        &self.time
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }
}
