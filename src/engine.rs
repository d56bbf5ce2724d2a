//! The interactive animation loop.
//!
//! Provides [`AnimationEngine`], which owns the display surface and a single
//! [`Ball`] and, once per iteration, toggles the decorative rows on a timer,
//! redraws the tilt arrow from the accelerometer and moves the ball in
//! response to button edges.

use crate::config::{BadgeConfig, ConfigError};
use crate::display::{COLUMNS, DisplayBackend, DisplaySurface, PixelState};
use crate::glyph::{ARROW_TOP_ROW, Arrow};
use crate::input::{ButtonEvent, Direction, InputSource};
use crate::sensor::{Accelerometer, SensorReader};
use crate::time::{Millis, TimeSource};

/// Columns the ball may occupy.
pub const BALL_COLUMNS: u8 = COLUMNS;
/// Rows the ball may occupy. Rows 8 to 15 are kept for the toggle rows and
/// the arrow, so the ball stays in the top half.
pub const BALL_ROWS: u8 = 8;

/// The movable pixel. Always inside `BALL_COLUMNS x BALL_ROWS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ball {
    x: u8,
    y: u8,
}

impl Ball {
    /// Creates a ball at `(x, y)`, or `None` outside the play area.
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x < BALL_COLUMNS && y < BALL_ROWS {
            Some(Self { x, y })
        } else {
            None
        }
    }

    pub const fn x(&self) -> u8 {
        self.x
    }

    pub const fn y(&self) -> u8 {
        self.y
    }

    pub const fn position(&self) -> (u8, u8) {
        (self.x, self.y)
    }

    /// The ball one cell towards `direction`, or `None` at the edge.
    pub fn stepped(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Left => self.x.checked_sub(1).and_then(|x| Ball::new(x, self.y)),
            Direction::Right => Ball::new(self.x + 1, self.y),
            Direction::Up => self.y.checked_sub(1).and_then(|y| Ball::new(self.x, y)),
            Direction::Down => Ball::new(self.x, self.y + 1),
        }
    }
}

/// Lifecycle of an [`AnimationEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// Constructed, ball not drawn yet.
    Idle,
    /// Looping.
    Running,
    /// ESCAPE received and the display closed. Terminal.
    Terminated,
}

/// Errors that can occur during engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Human-readable description of the expected state, e.g. "Running"
        expected: &'static str,
        /// The actual current state
        actual: EngineState,
    },
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but engine is in {:?}",
                    expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Drives the ball animation on an 8x16 display.
///
/// Each call to [`service`](Self::service) runs one loop iteration and never
/// waits: timed work is done by comparing the clock against a deadline.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `B` - Display backend
/// * `I` - Button input source
/// * `A` - Accelerometer
/// * `T` - Time source
pub struct AnimationEngine<'t, B, I, A, T>
where
    B: DisplayBackend,
    I: InputSource,
    A: Accelerometer,
    T: TimeSource,
{
    display: DisplaySurface<B>,
    input: I,
    sensor: SensorReader<A>,
    clock: &'t T,
    config: BadgeConfig,
    ball: Ball,
    arrow: Option<Arrow>,
    next_toggle: Option<Millis>,
    toggle_phase: bool,
    state: EngineState,
}

impl<'t, B, I, A, T> AnimationEngine<'t, B, I, A, T>
where
    B: DisplayBackend,
    I: InputSource,
    A: Accelerometer,
    T: TimeSource,
{
    /// Creates an idle engine. Validates `config`; nothing is drawn yet.
    pub fn new(
        display: DisplaySurface<B>,
        input: I,
        accel: A,
        clock: &'t T,
        config: BadgeConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let (x, y) = config.ball_start;
        let ball = Ball::new(x, y).ok_or(ConfigError::BallStartOutOfBounds { x, y })?;

        Ok(Self {
            display,
            input,
            sensor: SensorReader::new(accel),
            clock,
            config,
            ball,
            arrow: None,
            next_toggle: None,
            toggle_phase: false,
            state: EngineState::Idle,
        })
    }

    /// Draws the ball and arms the toggle timer.
    ///
    /// The first toggle is due immediately, so the first
    /// [`service`](Self::service) call always toggles.
    ///
    /// Must be called from `Idle` state.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state != EngineState::Idle {
            return Err(EngineError::InvalidState {
                expected: "Idle",
                actual: self.state,
            });
        }

        self.paint_ball(PixelState::On);
        self.display.publish();
        self.next_toggle = None;
        self.state = EngineState::Running;
        info!("animation started, ball at {}", self.ball);
        Ok(())
    }

    /// Runs one loop iteration: periodic toggle, arrow redraw, input dispatch.
    ///
    /// Must be called from `Running` state.
    ///
    /// # Returns
    /// - `Ok(EngineState::Running)` - Call again
    /// - `Ok(EngineState::Terminated)` - ESCAPE was handled, the display is closed
    /// - `Err` - Invalid state
    pub fn service(&mut self) -> Result<EngineState, EngineError> {
        if self.state != EngineState::Running {
            return Err(EngineError::InvalidState {
                expected: "Running",
                actual: self.state,
            });
        }

        self.service_toggle();
        self.redraw_arrow();
        let event = self.input.poll();
        self.dispatch(event);

        Ok(self.state)
    }

    /// Starts if idle, then services until ESCAPE.
    pub fn run(&mut self) -> Result<(), EngineError> {
        if self.state == EngineState::Idle {
            self.start()?;
        }

        while self.service()? != EngineState::Terminated {}
        Ok(())
    }

    /// Moves the ball one cell if it stays inside the play area.
    ///
    /// Returns false, without touching the display, when the ball is already
    /// at that edge.
    pub fn move_ball(&mut self, direction: Direction) -> bool {
        let Some(next) = self.ball.stepped(direction) else {
            trace!("move {} blocked at {}", direction, self.ball);
            return false;
        };

        self.paint_ball(PixelState::Off);
        self.display.publish();
        self.ball = next;
        self.paint_ball(PixelState::On);
        self.display.publish();

        trace!("ball moved {} to {}", direction, self.ball);
        true
    }

    fn service_toggle(&mut self) {
        let now = self.clock.now();
        let due = match self.next_toggle {
            Some(deadline) => now.is_after(deadline),
            None => true,
        };
        if !due {
            return;
        }

        for row in self.config.toggle_rows {
            if let Err(err) = self.display.toggle_row(row) {
                warn!("toggle skipped: {}", err);
            }
        }
        self.display.publish();

        self.toggle_phase = !self.toggle_phase;
        self.next_toggle = Some(now.wrapping_add(self.config.toggle_period_ms));
        trace!("rows toggled at {}", now);
    }

    fn redraw_arrow(&mut self) {
        let sample = self.sensor.sample_or_last();
        let arrow = Arrow::for_tilt(&sample, self.config.tilt_threshold);

        for (row, mask) in (ARROW_TOP_ROW..).zip(arrow.rows()) {
            if let Err(err) = self.display.set_row(row, mask) {
                warn!("arrow row skipped: {}", err);
            }
        }
        self.arrow = Some(arrow);
        self.display.publish();
    }

    fn dispatch(&mut self, event: ButtonEvent) {
        if event == ButtonEvent::Escape {
            info!("escape received, closing display");
            self.display.close();
            self.state = EngineState::Terminated;
            return;
        }

        if let Some(direction) = event.direction() {
            self.move_ball(direction);
        }
    }

    fn paint_ball(&mut self, state: PixelState) {
        if let Err(err) = self.display.set_pixel(self.ball.x, self.ball.y, state) {
            warn!("ball not painted: {}", err);
        }
    }

    /// Returns the current state of the engine.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns the ball.
    pub fn ball(&self) -> Ball {
        self.ball
    }

    /// Arrow drawn by the last iteration, `None` before the first one.
    pub fn arrow(&self) -> Option<Arrow> {
        self.arrow
    }

    /// Deadline of the next toggle, `None` while the first toggle is pending.
    pub fn next_toggle(&self) -> Option<Millis> {
        self.next_toggle
    }

    /// True after an odd number of toggles.
    pub fn toggle_phase(&self) -> bool {
        self.toggle_phase
    }

    pub fn config(&self) -> &BadgeConfig {
        &self.config
    }

    pub fn display(&self) -> &DisplaySurface<B> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplaySurface<B> {
        &mut self.display
    }

    /// Consumes the engine, returning the display surface.
    pub fn into_display(self) -> DisplaySurface<B> {
        self.display
    }
}
