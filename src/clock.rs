//! Approximate millisecond clock derived from the tick counter.
//!
//! The counter advances at [`TICK_HZ`](crate::shared::TICK_HZ) (1202 Hz), so a
//! true conversion would scale by ~0.832. Instead the clock uses two shifts,
//! `(t >> 1) + (t >> 2)`, a 75% scaling that runs about 10% slow. That is
//! close enough for animation deadlines and needs no division.

use embedded_hal::delay::DelayNs;

use crate::shared::TickCounter;
use crate::time::{Millis, TimeSource};

/// Granule of the startup busy wait.
pub const DELAY_GRANULE_MS: u16 = 10;

/// Converts a raw tick count to approximate milliseconds.
#[inline]
pub const fn ticks_to_millis(ticks: u32) -> Millis {
    Millis((ticks >> 1) + (ticks >> 2))
}

/// Non-blocking clock reading a shared [`TickCounter`].
#[derive(Clone, Copy)]
pub struct Clock<'t> {
    ticks: &'t TickCounter,
}

impl<'t> Clock<'t> {
    /// Creates a clock over the given counter.
    pub fn new(ticks: &'t TickCounter) -> Self {
        Self { ticks }
    }

    /// Blocking busy wait. Startup only; see [`blocking_delay_ms`].
    pub fn delay<D: DelayNs>(&self, delay: &mut D, ms: u16) {
        blocking_delay_ms(delay, ms);
    }
}

impl TimeSource for Clock<'_> {
    fn now(&self) -> Millis {
        ticks_to_millis(self.ticks.load())
    }
}

/// Blocks for roughly `ms` milliseconds in [`DELAY_GRANULE_MS`] steps.
///
/// The remainder below one granule is dropped, so waits shorter than 10 ms
/// return immediately. Never call this from the animation loop.
pub fn blocking_delay_ms<D: DelayNs>(delay: &mut D, ms: u16) {
    for _ in 0..ms / DELAY_GRANULE_MS {
        delay.delay_ms(DELAY_GRANULE_MS as u32);
    }
}
