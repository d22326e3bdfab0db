//! Displayed fields and the controller that animates one of them.

use heapless::String;

use crate::animator::{Generation, RevealAnimator, Scheduler, StepOutcome};
use crate::delay::DelaySource;
use crate::Millis;

/// A region of the watch face.
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum FieldId {
    Time,
    Date,
    Steps,
}

/// Anything that can show a string in a field. Must accept the empty string.
pub trait TextDisplay {
    fn render(&mut self, field: FieldId, text: &str);
}

impl<T: TextDisplay + ?Sized> TextDisplay for &mut T {
    fn render(&mut self, field: FieldId, text: &str) {
        (**self).render(field, text)
    }
}

/// Drives one animated field and remembers what it last sent to the display.
pub struct FieldController<D, const N: usize> {
    animator: RevealAnimator<D, N>,
    last_rendered: String<N>,
}

impl<D: DelaySource, const N: usize> FieldController<D, N> {
    pub fn new(field: FieldId, initial_delay: Millis, delays: D) -> Self {
        Self {
            animator: RevealAnimator::new(field, initial_delay, delays),
            last_rendered: String::new(),
        }
    }

    /// Restarts the reveal with a fresh value.
    pub fn refresh<V, S>(&mut self, value: &str, display: &mut V, scheduler: &mut S)
    where
        V: TextDisplay + ?Sized,
        S: Scheduler + ?Sized,
    {
        let mut tap = Tap {
            inner: display,
            last: &mut self.last_rendered,
        };
        self.animator.start_reveal(value, &mut tap, scheduler);
    }

    pub fn on_timer_fired<V, S>(&mut self, fired: Generation, display: &mut V, scheduler: &mut S) -> StepOutcome
    where
        V: TextDisplay + ?Sized,
        S: Scheduler + ?Sized,
    {
        let mut tap = Tap {
            inner: display,
            last: &mut self.last_rendered,
        };
        self.animator.on_timer_fired(fired, &mut tap, scheduler)
    }

    /// The text most recently sent to the display for this field.
    pub fn current_displayed_prefix(&self) -> &str {
        &self.last_rendered
    }

    pub fn animator(&self) -> &RevealAnimator<D, N> {
        &self.animator
    }
}

/// Forwards writes while keeping a copy of the last one.
struct Tap<'a, V: ?Sized, const N: usize> {
    inner: &'a mut V,
    last: &'a mut String<N>,
}

impl<V: TextDisplay + ?Sized, const N: usize> TextDisplay for Tap<'_, V, N> {
    fn render(&mut self, field: FieldId, text: &str) {
        self.last.clear();
        for ch in text.chars() {
            if self.last.push(ch).is_err() {
                break;
            }
        }
        self.inner.render(field, text);
    }
}
