//! Bookkeeping for a single hardware one-shot alarm used as the reveal
//! [`Scheduler`](crate::Scheduler).
//!
//! Re-arming a hardware alarm replaces its countdown, but an interrupt that
//! was already pending at the controller still gets delivered. The slot only
//! hands out a generation once the countdown that carried it has run out.

use crate::animator::{Generation, TimerHandle};

#[derive(Debug, Default)]
pub struct AlarmSlot {
    armed: Option<Generation>,
    issued: u32,
}

impl AlarmSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the alarm now counts down for `generation`.
    pub fn arm(&mut self, generation: Generation) -> TimerHandle {
        self.armed = Some(generation);
        self.issued = self.issued.wrapping_add(1);
        TimerHandle::new(self.issued)
    }

    /// Called from the alarm interrupt. `expired` is the peripheral's own
    /// view of whether the current countdown finished.
    pub fn acknowledge(&mut self, expired: bool) -> Option<Generation> {
        if !expired {
            trace!("alarm interrupt without expiry, ignored");
            return None;
        }
        self.armed.take()
    }

    pub fn armed(&self) -> Option<Generation> {
        self.armed
    }
}
