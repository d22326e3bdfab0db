//! Progressive reveal of a string, one character per timer firing.
//!
//! Every cycle is tagged with a [`Generation`]. Timers carry the generation
//! that armed them, and a firing whose generation is no longer current is
//! dropped. Superseded timers are therefore never removed from the host's
//! queue; they just turn into no-ops when they come due.

use heapless::String;

use crate::delay::DelaySource;
use crate::error::ScheduleError;
use crate::field::{FieldId, TextDisplay};
use crate::Millis;

/// Version counter distinguishing the current reveal cycle from older ones.
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Generation(u32);

impl Generation {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Identifies a timer armed through a [`Scheduler`].
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct TimerHandle(u32);

impl TimerHandle {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Host event loop facility for one-shot timers.
///
/// When the timer expires the host must hand `generation` back to
/// [`RevealAnimator::on_timer_fired`], on the same thread that calls
/// [`RevealAnimator::start_reveal`].
pub trait Scheduler {
    fn schedule(&mut self, after: Millis, generation: Generation) -> Result<TimerHandle, ScheduleError>;
}

impl<T: Scheduler + ?Sized> Scheduler for &mut T {
    fn schedule(&mut self, after: Millis, generation: Generation) -> Result<TimerHandle, ScheduleError> {
        (**self).schedule(after, generation)
    }
}

#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum AnimationState {
    /// Whole target shown (or empty); no timer outstanding.
    Idle,
    /// A timer is armed for the next character.
    Revealing,
}

/// What a timer firing did.
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum StepOutcome {
    /// The firing belonged to a superseded cycle and was ignored.
    Stale,
    /// One more character was shown and the next timer armed.
    Revealed { count: usize },
    /// The last character was shown; the animator is idle.
    Completed,
    /// Nothing left to reveal; no display write happened.
    AlreadyIdle,
}

/// Reveals `target` one character at a time, `N` bytes of capacity.
pub struct RevealAnimator<D, const N: usize> {
    field: FieldId,
    target: String<N>,
    /// Length of `target` in characters.
    target_len: usize,
    revealed: usize,
    pending: Option<TimerHandle>,
    generation: Generation,
    initial_delay: Millis,
    delays: D,
}

impl<D: DelaySource, const N: usize> RevealAnimator<D, N> {
    pub fn new(field: FieldId, initial_delay: Millis, delays: D) -> Self {
        Self {
            field,
            target: String::new(),
            target_len: 0,
            revealed: 0,
            pending: None,
            generation: Generation::default(),
            initial_delay,
            delays,
        }
    }

    /// Starts a new cycle, superseding whatever cycle is in progress.
    ///
    /// Clears the field, then arms the initial delay. An empty target leaves
    /// the animator idle with no timer armed.
    pub fn start_reveal<V, S>(&mut self, target: &str, display: &mut V, scheduler: &mut S)
    where
        V: TextDisplay + ?Sized,
        S: Scheduler + ?Sized,
    {
        self.generation = self.generation.next();
        self.set_target(target);
        self.revealed = 0;
        self.pending = None;

        display.render(self.field, "");
        debug!("reveal start gen={} len={}", self.generation.value(), self.target_len);

        if self.target_len == 0 {
            return;
        }
        self.arm(self.initial_delay, display, scheduler);
    }

    /// Advances the cycle tagged `fired` by one character.
    pub fn on_timer_fired<V, S>(&mut self, fired: Generation, display: &mut V, scheduler: &mut S) -> StepOutcome
    where
        V: TextDisplay + ?Sized,
        S: Scheduler + ?Sized,
    {
        if fired != self.generation {
            trace!("stale timer gen={} current={}", fired.value(), self.generation.value());
            return StepOutcome::Stale;
        }
        if self.revealed >= self.target_len {
            self.pending = None;
            return StepOutcome::AlreadyIdle;
        }

        self.revealed += 1;
        display.render(self.field, self.prefix());
        trace!("revealed {=str}", self.prefix());

        if self.revealed < self.target_len {
            let delay = self.delays.next_delay();
            self.arm(delay, display, scheduler);
            if self.pending.is_some() {
                return StepOutcome::Revealed { count: self.revealed };
            }
        }
        self.pending = None;
        StepOutcome::Completed
    }

    pub fn state(&self) -> AnimationState {
        if self.pending.is_some() {
            AnimationState::Revealing
        } else {
            AnimationState::Idle
        }
    }

    /// The leading characters revealed so far.
    pub fn prefix(&self) -> &str {
        let end = self
            .target
            .char_indices()
            .nth(self.revealed)
            .map_or(self.target.len(), |(at, _)| at);
        &self.target[..end]
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn field(&self) -> FieldId {
        self.field
    }

    fn set_target(&mut self, target: &str) {
        self.target.clear();
        self.target_len = 0;
        for ch in target.chars() {
            if self.target.push(ch).is_err() {
                warn!("target truncated to {} bytes", N);
                break;
            }
            self.target_len += 1;
        }
    }

    /// Arms the next step. If the host cannot arm timers the rest of the
    /// target is shown at once, so the field never sticks on a partial prefix.
    fn arm<V, S>(&mut self, after: Millis, display: &mut V, scheduler: &mut S)
    where
        V: TextDisplay + ?Sized,
        S: Scheduler + ?Sized,
    {
        match scheduler.schedule(after, self.generation) {
            Ok(handle) => self.pending = Some(handle),
            Err(err) => {
                warn!("reveal timer failed: {}, showing full text", err);
                self.pending = None;
                self.revealed = self.target_len;
                display.render(self.field, &self.target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedDelay, RecordingDisplay, RecordingScheduler};

    type Animator = RevealAnimator<FixedDelay, 8>;

    fn animator() -> Animator {
        RevealAnimator::new(FieldId::Time, Millis::from_ticks(500), FixedDelay(300))
    }

    /// Fires the most recently armed timer.
    fn fire_last(anim: &mut Animator, display: &mut RecordingDisplay, sched: &mut RecordingScheduler) -> StepOutcome {
        let (_, generation) = *sched.requests.last().unwrap();
        anim.on_timer_fired(generation, display, sched)
    }

    #[test]
    fn reveals_one_character_per_firing() {
        let (mut display, mut sched) = (RecordingDisplay::default(), RecordingScheduler::default());
        let mut anim = animator();

        anim.start_reveal("abc", &mut display, &mut sched);
        assert_eq!(anim.state(), AnimationState::Revealing);
        assert_eq!(sched.requests[0].0.to_millis(), 500);

        assert_eq!(fire_last(&mut anim, &mut display, &mut sched), StepOutcome::Revealed { count: 1 });
        assert_eq!(fire_last(&mut anim, &mut display, &mut sched), StepOutcome::Revealed { count: 2 });
        assert_eq!(fire_last(&mut anim, &mut display, &mut sched), StepOutcome::Completed);

        assert_eq!(display.texts(FieldId::Time), ["", "a", "ab", "abc"]);
        assert_eq!(anim.state(), AnimationState::Idle);
        assert_eq!(anim.pending_timer(), None);
        assert_eq!(sched.requests.len(), 3);
        assert!(sched.requests[1..].iter().all(|(d, _)| d.to_millis() == 300));
    }

    #[test]
    fn empty_target_is_immediately_idle() {
        let (mut display, mut sched) = (RecordingDisplay::default(), RecordingScheduler::default());
        let mut anim = animator();

        anim.start_reveal("", &mut display, &mut sched);

        assert_eq!(anim.state(), AnimationState::Idle);
        assert!(sched.requests.is_empty());
        assert_eq!(display.texts(FieldId::Time), [""]);
    }

    #[test]
    fn single_character_completes_in_one_step() {
        let (mut display, mut sched) = (RecordingDisplay::default(), RecordingScheduler::default());
        let mut anim = animator();

        anim.start_reveal("7", &mut display, &mut sched);
        assert_eq!(fire_last(&mut anim, &mut display, &mut sched), StepOutcome::Completed);

        assert_eq!(display.texts(FieldId::Time), ["", "7"]);
        assert_eq!(sched.requests.len(), 1);
    }

    #[test]
    fn restart_invalidates_previous_cycle() {
        let (mut display, mut sched) = (RecordingDisplay::default(), RecordingScheduler::default());
        let mut anim = animator();

        anim.start_reveal("AAAA", &mut display, &mut sched);
        fire_last(&mut anim, &mut display, &mut sched);
        let (_, old_generation) = *sched.requests.last().unwrap();

        anim.start_reveal("BB", &mut display, &mut sched);
        assert_ne!(anim.generation(), old_generation);

        // the timer armed by the first cycle still comes due
        assert_eq!(anim.on_timer_fired(old_generation, &mut display, &mut sched), StepOutcome::Stale);
        assert_eq!(anim.revealed_count(), 0);

        fire_last(&mut anim, &mut display, &mut sched);
        fire_last(&mut anim, &mut display, &mut sched);

        assert_eq!(display.texts(FieldId::Time), ["", "A", "", "B", "BB"]);
        assert_eq!(anim.target(), "BB");
    }

    #[test]
    fn stale_timer_cannot_extend_newer_prefix() {
        let (mut display, mut sched) = (RecordingDisplay::default(), RecordingScheduler::default());
        let mut anim = animator();

        anim.start_reveal("AAAA", &mut display, &mut sched);
        fire_last(&mut anim, &mut display, &mut sched);
        let old_generation = anim.generation();

        anim.start_reveal("BBB", &mut display, &mut sched);
        fire_last(&mut anim, &mut display, &mut sched);
        assert_eq!(anim.prefix(), "B");
        let writes = display.writes.len();
        let armed = sched.requests.len();

        assert_eq!(anim.on_timer_fired(old_generation, &mut display, &mut sched), StepOutcome::Stale);
        assert_eq!(anim.prefix(), "B");
        assert_eq!(anim.revealed_count(), 1);
        assert_eq!(display.writes.len(), writes);
        assert_eq!(sched.requests.len(), armed);

        fire_last(&mut anim, &mut display, &mut sched);
        fire_last(&mut anim, &mut display, &mut sched);
        assert_eq!(display.texts(FieldId::Time), ["", "A", "", "B", "BB", "BBB"]);
    }

    #[test]
    fn duplicate_firing_after_completion_writes_nothing() {
        let (mut display, mut sched) = (RecordingDisplay::default(), RecordingScheduler::default());
        let mut anim = animator();

        anim.start_reveal("ok", &mut display, &mut sched);
        let generation = anim.generation();
        anim.on_timer_fired(generation, &mut display, &mut sched);
        anim.on_timer_fired(generation, &mut display, &mut sched);
        let writes = display.writes.len();

        assert_eq!(anim.on_timer_fired(generation, &mut display, &mut sched), StepOutcome::AlreadyIdle);
        assert_eq!(display.writes.len(), writes);
        assert_eq!(anim.revealed_count(), 2);
        assert_eq!(anim.state(), AnimationState::Idle);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let (mut display, mut sched) = (RecordingDisplay::default(), RecordingScheduler::default());
        let mut anim = animator();

        anim.start_reveal("é1", &mut display, &mut sched);
        fire_last(&mut anim, &mut display, &mut sched);
        fire_last(&mut anim, &mut display, &mut sched);

        assert_eq!(display.texts(FieldId::Time), ["", "é", "é1"]);
    }

    #[test]
    fn oversized_target_is_truncated_on_char_boundary() {
        let (mut display, mut sched) = (RecordingDisplay::default(), RecordingScheduler::default());
        let mut anim: RevealAnimator<FixedDelay, 4> =
            RevealAnimator::new(FieldId::Time, Millis::from_ticks(500), FixedDelay(300));

        anim.start_reveal("abcéd", &mut display, &mut sched);

        assert_eq!(anim.target(), "abc");
    }

    #[test]
    fn schedule_failure_shows_full_text() {
        let mut display = RecordingDisplay::default();
        let mut sched = RecordingScheduler { fail: true, ..Default::default() };
        let mut anim = animator();

        anim.start_reveal("12:00", &mut display, &mut sched);

        assert_eq!(anim.state(), AnimationState::Idle);
        assert_eq!(anim.revealed_count(), 5);
        assert_eq!(display.texts(FieldId::Time), ["", "12:00"]);
    }

    #[test]
    fn schedule_failure_mid_cycle_completes() {
        let (mut display, mut sched) = (RecordingDisplay::default(), RecordingScheduler::default());
        let mut anim = animator();

        anim.start_reveal("xyz", &mut display, &mut sched);
        sched.fail = true;
        let outcome = anim.on_timer_fired(anim.generation(), &mut display, &mut sched);

        assert_eq!(outcome, StepOutcome::Completed);
        assert_eq!(display.texts(FieldId::Time), ["", "x", "xyz"]);
        assert_eq!(anim.state(), AnimationState::Idle);
    }
}
