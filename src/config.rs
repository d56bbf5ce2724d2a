//! Startup configuration, validated once at boot.

use crate::display::ROWS;
use crate::engine::{BALL_COLUMNS, BALL_ROWS};
use crate::glyph::DEFAULT_TILT_THRESHOLD;

/// Highest brightness the kernel's PWM dimming accepts.
pub const MAX_BRIGHTNESS: u8 = 15;

/// Configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The ball would start outside its 8x8 area.
    BallStartOutOfBounds { x: u8, y: u8 },
    /// A zero toggle period would toggle on every iteration.
    ZeroTogglePeriod,
    /// Brightness above [`MAX_BRIGHTNESS`].
    BrightnessOutOfRange(u8),
    /// A toggle row outside the display.
    ToggleRowOutOfBounds(u8),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::BallStartOutOfBounds { x, y } => write!(
                f,
                "ball start ({}, {}) is outside the {}x{} play area",
                x, y, BALL_COLUMNS, BALL_ROWS
            ),
            ConfigError::ZeroTogglePeriod => write!(f, "toggle period must be non-zero"),
            ConfigError::BrightnessOutOfRange(level) => {
                write!(f, "brightness {} exceeds maximum of {}", level, MAX_BRIGHTNESS)
            }
            ConfigError::ToggleRowOutOfBounds(row) => {
                write!(f, "toggle row {} is outside the {}-row display", row, ROWS)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Badge configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BadgeConfig {
    /// Starting cell of the ball.
    pub ball_start: (u8, u8),
    /// Interval between decorative row toggles, in clock milliseconds.
    pub toggle_period_ms: u32,
    /// Rows inverted on each toggle.
    pub toggle_rows: [u8; 2],
    /// X high byte below which the left arrow is drawn.
    pub tilt_threshold: u8,
    /// Display brightness, 0 (dimmest) to [`MAX_BRIGHTNESS`].
    pub brightness: u8,
}

impl BadgeConfig {
    /// The stock badge configuration.
    pub const fn new() -> Self {
        Self {
            ball_start: (4, 3),
            toggle_period_ms: 1000,
            toggle_rows: [8, 9],
            tilt_threshold: DEFAULT_TILT_THRESHOLD,
            brightness: MAX_BRIGHTNESS,
        }
    }

    pub const fn with_ball_start(mut self, x: u8, y: u8) -> Self {
        self.ball_start = (x, y);
        self
    }

    pub const fn with_toggle_period_ms(mut self, ms: u32) -> Self {
        self.toggle_period_ms = ms;
        self
    }

    pub const fn with_toggle_rows(mut self, rows: [u8; 2]) -> Self {
        self.toggle_rows = rows;
        self
    }

    pub const fn with_tilt_threshold(mut self, threshold: u8) -> Self {
        self.tilt_threshold = threshold;
        self
    }

    pub const fn with_brightness(mut self, level: u8) -> Self {
        self.brightness = level;
        self
    }

    /// Checks every field against the hardware limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (x, y) = self.ball_start;
        if x >= BALL_COLUMNS || y >= BALL_ROWS {
            return Err(ConfigError::BallStartOutOfBounds { x, y });
        }

        if self.toggle_period_ms == 0 {
            return Err(ConfigError::ZeroTogglePeriod);
        }

        if let Some(&row) = self.toggle_rows.iter().find(|&&row| row >= ROWS) {
            return Err(ConfigError::ToggleRowOutOfBounds(row));
        }

        if self.brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::BrightnessOutOfRange(self.brightness));
        }

        Ok(())
    }
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self::new()
    }
}
