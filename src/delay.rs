//! Per-character delay sampling.

use fugit::ExtU32;
use rand::{Rng, RngCore};

use crate::config::RevealTiming;
use crate::Millis;

/// Source of the pause between two revealed characters.
pub trait DelaySource {
    fn next_delay(&mut self) -> Millis;
}

/// Uniformly samples delays from `[min_delay, max_delay)`.
pub struct RandomDelay<R> {
    rng: R,
    min_ms: u32,
    max_ms: u32,
}

impl<R: RngCore> RandomDelay<R> {
    pub fn new(rng: R, timing: &RevealTiming) -> Self {
        Self {
            rng,
            min_ms: timing.min_delay().to_millis(),
            max_ms: timing.max_delay().to_millis(),
        }
    }
}

impl<R: RngCore> DelaySource for RandomDelay<R> {
    fn next_delay(&mut self) -> Millis {
        // RevealTiming guarantees min < max, so the range is never empty.
        self.rng.gen_range(self.min_ms..self.max_ms).millis()
    }
}

impl<T: DelaySource + ?Sized> DelaySource for &mut T {
    fn next_delay(&mut self) -> Millis {
        (**self).next_delay()
    }
}
