//! State shared between the kernel (timer interrupt, debouncer, sensor read)
//! and the polling loop.
//!
//! Every field is wrapped in a `critical_section::Mutex<Cell<_>>`. The tick
//! counter is 32 bits wide, wider than what small cores load or store in a
//! single instruction, so a torn read would otherwise be possible.
//!
//! | Field     | Writer                         | Reader                       |
//! |-----------|--------------------------------|------------------------------|
//! | ticks     | timer overflow interrupt       | [`Clock`](crate::clock::Clock) |
//! | key edges | kernel debouncer (sets bits)   | [`EdgeInput`](crate::input::EdgeInput) (clears) |
//! | accel     | kernel accelerometer read      | [`KernelAccel`](crate::sensor::KernelAccel) |
//!
//! ```ignore
//! static KERNEL: SharedState = SharedState::new();
//!
//! #[interrupt]
//! fn TIMER0() {
//!     KERNEL.on_timer_overflow();
//! }
//! ```

use core::cell::Cell;
use critical_section::Mutex;

use crate::sensor::AccelSample;

/// Display scan overflow rate driving the tick counter, in Hz.
pub const TICK_HZ: u32 = 1202;

/// Free running tick counter incremented from interrupt context.
///
/// Wraps after `u32::MAX` ticks, roughly 41 days at [`TICK_HZ`].
pub struct TickCounter {
    ticks: Mutex<Cell<u32>>,
}

impl TickCounter {
    /// Creates a counter starting at zero.
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Creates a counter starting at `ticks`.
    pub const fn starting_at(ticks: u32) -> Self {
        Self {
            ticks: Mutex::new(Cell::new(ticks)),
        }
    }

    /// Advances the counter by one tick.
    ///
    /// This is the timer overflow callback. It never blocks and only touches
    /// the counter, so it is safe to call from an interrupt handler.
    #[inline]
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let counter = self.ticks.borrow(cs);
            counter.set(counter.get().wrapping_add(1));
        });
    }

    /// Returns a consistent snapshot of the counter.
    #[inline]
    pub fn load(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// The kernel's memory map: ticks, debounced key edges and the last
/// accelerometer sample.
pub struct SharedState {
    ticks: TickCounter,
    key_edges: Mutex<Cell<u8>>,
    accel: Mutex<Cell<Option<AccelSample>>>,
}

impl SharedState {
    /// Creates empty shared state: zero ticks, no edges, no sample yet.
    pub const fn new() -> Self {
        Self {
            ticks: TickCounter::new(),
            key_edges: Mutex::new(Cell::new(0)),
            accel: Mutex::new(Cell::new(None)),
        }
    }

    /// Timer overflow callback. See [`TickCounter::tick`].
    #[inline]
    pub fn on_timer_overflow(&self) {
        self.ticks.tick();
    }

    /// Returns the tick counter.
    pub fn ticks(&self) -> &TickCounter {
        &self.ticks
    }

    /// Records debounced key edges. Bits accumulate until the loop takes them.
    pub fn latch_key_edges(&self, mask: u8) {
        critical_section::with(|cs| {
            let edges = self.key_edges.borrow(cs);
            edges.set(edges.get() | mask);
        });
    }

    /// Returns the pending key edge mask and clears it in the same critical
    /// section, so an edge latched concurrently is never lost or seen twice.
    pub fn take_key_edges(&self) -> u8 {
        critical_section::with(|cs| self.key_edges.borrow(cs).replace(0))
    }

    /// Stores a fresh accelerometer sample.
    pub fn store_accel(&self, sample: AccelSample) {
        critical_section::with(|cs| self.accel.borrow(cs).set(Some(sample)));
    }

    /// Returns the most recent sample, or `None` if the kernel never stored one.
    pub fn accel(&self) -> Option<AccelSample> {
        critical_section::with(|cs| self.accel.borrow(cs).get())
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
