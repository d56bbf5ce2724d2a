#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SharedState`**: The kernel's memory map (tick counter, key edges, accelerometer sample)
//! - **`Clock`**: Approximate milliseconds derived from the tick counter
//! - **`EdgeInput`** / **`InputSource`**: Destructive button edge reader
//! - **`CodeInput`**: Reader over a collaborator returning numeric button codes, the only source of ESCAPE
//! - **`SensorReader`** / **`Accelerometer`**: Accelerometer sampling with last-known fallback
//! - **`DisplaySurface`** / **`DisplayBackend`**: 8x16 bitmap and the hardware that shows it
//! - **`AnimationEngine`**: The ball, tilt arrow and blinking rows, one iteration per `service` call
//! - **`BadgeConfig`**: Startup configuration, validated once
//! - **`boot`**: Bring-up followed by the animation loop
//!
//! Only the tick counter is written from interrupt context. Everything else
//! is driven from the single polling loop, which never waits.

#[macro_use]
mod fmt;

pub mod time;
pub mod shared;
pub mod clock;
pub mod input;
pub mod sensor;
pub mod display;
pub mod glyph;
pub mod config;
pub mod engine;
pub mod runtime;

pub use time::{Millis, TimeSource};
pub use shared::{SharedState, TICK_HZ, TickCounter};
pub use clock::{Clock, blocking_delay_ms, ticks_to_millis};
pub use input::{ButtonEvent, CodeInput, Direction, EdgeInput, InputSource, decode_key_edges};
pub use sensor::{AccelSample, Accelerometer, Axis, KernelAccel, SensorError, SensorReader};
pub use display::{COLUMNS, DisplayBackend, DisplayError, DisplaySurface, Frame, PixelState, ROWS};
pub use glyph::Arrow;
pub use config::{BadgeConfig, ConfigError};
pub use engine::{AnimationEngine, BALL_COLUMNS, BALL_ROWS, Ball, EngineError, EngineState};
pub use runtime::{BootError, Kernel, boot};
