//! Millisecond instants and the time source abstraction.

/// Half of the `u32` range. Two instants further apart than this are
/// ambiguous, so ordering is only defined within it.
const HALF_RANGE: u32 = 1 << 31;

/// An approximate millisecond reading that wraps at `u32::MAX`.
///
/// Comparisons are subtraction based, so a deadline scheduled just before the
/// counter wraps is still ordered correctly against readings taken after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    /// The zero reading.
    pub const ZERO: Self = Millis(0);

    /// Returns the raw millisecond count.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns this instant shifted `ms` into the future, wrapping on overflow.
    #[inline]
    pub const fn wrapping_add(self, ms: u32) -> Self {
        Millis(self.0.wrapping_add(ms))
    }

    /// Milliseconds elapsed since `earlier`, correct across one wraparound.
    #[inline]
    pub const fn wrapping_since(self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Returns true if `self` is strictly later than `other`.
    #[inline]
    pub const fn is_after(self, other: Self) -> bool {
        let diff = self.wrapping_since(other);
        diff != 0 && diff < HALF_RANGE
    }
}

/// Trait for abstracting time sources.
pub trait TimeSource {
    /// Returns the current time.
    fn now(&self) -> Millis;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Millis {
        (**self).now()
    }
}
