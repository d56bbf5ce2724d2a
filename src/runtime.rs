//! Process entry: bring-up followed by the animation loop.

use embedded_hal::delay::DelayNs;

use crate::clock::blocking_delay_ms;
use crate::config::{BadgeConfig, ConfigError};
use crate::display::{DisplayBackend, DisplaySurface};
use crate::engine::{AnimationEngine, EngineError};
use crate::input::InputSource;
use crate::sensor::Accelerometer;
use crate::time::TimeSource;

/// Startup delay before any kernel call, in milliseconds.
///
/// Below one delay granule, so it completes without waiting.
pub const STARTUP_DELAY_MS: u16 = 1;

/// One-time kernel setup hooks.
///
/// Both calls are made exactly once, before the loop, and are assumed to be
/// idempotent and infallible.
pub trait Kernel {
    /// Turns the display on with every LED off.
    fn init_display(&mut self, brightness: u8);

    /// Enables button input.
    fn init_control(&mut self);
}

impl<K: Kernel + ?Sized> Kernel for &mut K {
    fn init_display(&mut self, brightness: u8) {
        (**self).init_display(brightness)
    }

    fn init_control(&mut self) {
        (**self).init_control()
    }
}

/// Errors that abort boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// The configuration failed validation. No collaborator was touched.
    Config(ConfigError),
    /// The engine rejected a lifecycle call.
    Engine(EngineError),
}

impl core::fmt::Display for BootError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BootError::Config(err) => write!(f, "configuration error: {}", err),
            BootError::Engine(err) => write!(f, "engine error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BootError {}

impl From<ConfigError> for BootError {
    fn from(err: ConfigError) -> Self {
        BootError::Config(err)
    }
}

impl From<EngineError> for BootError {
    fn from(err: EngineError) -> Self {
        BootError::Engine(err)
    }
}

/// Boots the badge and runs the animation until ESCAPE.
///
/// Order: validate `config`, startup delay, display and control init, clear
/// and publish, one discarded clock read, then the loop. Returns the backend
/// once the loop has ended and the display is closed.
pub fn boot<K, D, B, I, A, T>(
    config: BadgeConfig,
    kernel: &mut K,
    delay: &mut D,
    backend: B,
    input: I,
    accel: A,
    clock: &T,
) -> Result<B, BootError>
where
    K: Kernel,
    D: DelayNs,
    B: DisplayBackend,
    I: InputSource,
    A: Accelerometer,
    T: TimeSource,
{
    let mut engine = AnimationEngine::new(DisplaySurface::new(backend), input, accel, clock, config)?;
    debug!("configuration accepted: {}", config);

    blocking_delay_ms(delay, STARTUP_DELAY_MS);
    kernel.init_display(config.brightness);
    kernel.init_control();

    let display = engine.display_mut();
    display.clear();
    display.publish();

    let _ = clock.now();
    debug!("hardware ready, entering animation loop");

    engine.run()?;
    Ok(engine.into_display().into_backend())
}
