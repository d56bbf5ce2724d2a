//! Tilt arrow drawn in the bottom rows of the display.

use crate::sensor::{AccelSample, Axis};

/// First row of the arrow glyph.
pub const ARROW_TOP_ROW: u8 = 11;
/// Height of the arrow glyph in rows.
pub const ARROW_HEIGHT: usize = 5;

/// Default X high-byte threshold separating [`Arrow::Left`] from [`Arrow::Right`].
pub const DEFAULT_TILT_THRESHOLD: u8 = 0xF0;

/// Which way the badge leans on its X axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arrow {
    Left,
    Right,
}

impl Arrow {
    /// Picks the arrow for `sample`: X high byte below `threshold` is left.
    pub const fn for_tilt(sample: &AccelSample, threshold: u8) -> Self {
        if sample.high_byte(Axis::X) < threshold {
            Arrow::Left
        } else {
            Arrow::Right
        }
    }

    /// Row masks of the glyph, starting at [`ARROW_TOP_ROW`].
    pub const fn rows(self) -> [u8; ARROW_HEIGHT] {
        match self {
            Arrow::Left => [
                0b0000_0100,
                0b0000_0010,
                0b1111_1111,
                0b0000_0010,
                0b0000_0100,
            ],
            Arrow::Right => [
                0b0010_0000,
                0b0100_0000,
                0b1111_1111,
                0b0100_0000,
                0b0010_0000,
            ],
        }
    }
}
