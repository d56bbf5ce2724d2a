//! Shared test infrastructure for badge-animate integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use badge_animate::{
    AccelSample, Accelerometer, ButtonEvent, DisplayBackend, Frame, InputSource, Kernel, Millis,
    SensorError, TimeSource,
};
use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<Millis>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(Millis(0)),
        }
    }

    pub fn at(ms: u32) -> Self {
        Self {
            current_time: Cell::new(Millis(ms)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, ms: u32) {
        let current = self.current_time.get();
        self.current_time.set(current.wrapping_add(ms));
    }

    pub fn set_time(&self, ms: u32) {
        self.current_time.set(Millis(ms));
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Millis {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Display Backend
// ============================================================================

/// Mock backend that records every latched frame
pub struct MockBackend {
    latched: Vec<Frame, 64>,
    latch_count: usize,
    close_count: usize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            latched: Vec::new(),
            latch_count: 0,
            close_count: 0,
        }
    }

    pub fn latch_count(&self) -> usize {
        self.latch_count
    }

    pub fn close_count(&self) -> usize {
        self.close_count
    }

    /// Most recently latched frame, if any
    pub fn last_frame(&self) -> Option<Frame> {
        self.latched.last().copied()
    }

    /// The first 64 latched frames
    pub fn history(&self) -> &[Frame] {
        &self.latched
    }
}

impl DisplayBackend for MockBackend {
    fn latch(&mut self, frame: &Frame) {
        self.latch_count += 1;
        let _ = self.latched.push(*frame);
    }

    fn close(&mut self) {
        self.close_count += 1;
    }
}

// ============================================================================
// Scripted Input
// ============================================================================

/// Input source that replays queued events, then reports `None`
pub struct ScriptedInput {
    events: Deque<ButtonEvent, 32>,
    polls: usize,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self {
            events: Deque::new(),
            polls: 0,
        }
    }

    pub fn with_events(events: &[ButtonEvent]) -> Self {
        let mut input = Self::new();
        for &event in events {
            input.push(event);
        }
        input
    }

    pub fn push(&mut self, event: ButtonEvent) {
        let _ = self.events.push_back(event);
    }

    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> ButtonEvent {
        self.polls += 1;
        self.events.pop_front().unwrap_or(ButtonEvent::None)
    }
}

// ============================================================================
// Mock Accelerometer
// ============================================================================

/// Accelerometer returning a settable sample or error
pub struct MockAccel {
    result: Result<AccelSample, SensorError>,
    polls: usize,
}

impl MockAccel {
    pub fn with_x(x: u16) -> Self {
        Self {
            result: Ok(AccelSample::new(x, 0, 0)),
            polls: 0,
        }
    }

    pub fn missing() -> Self {
        Self {
            result: Err(SensorError::NotPresent),
            polls: 0,
        }
    }

    pub fn set_x(&mut self, x: u16) {
        self.result = Ok(AccelSample::new(x, 0, 0));
    }

    pub fn fail(&mut self) {
        self.result = Err(SensorError::ReadFailed);
    }

    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl Accelerometer for MockAccel {
    fn poll(&mut self) -> Result<AccelSample, SensorError> {
        self.polls += 1;
        self.result
    }
}

// ============================================================================
// Mock Kernel and Delay
// ============================================================================

/// Kernel recording init calls in order
#[derive(Default)]
pub struct MockKernel {
    pub calls: Vec<&'static str, 8>,
    pub brightness: Option<u8>,
}

impl Kernel for MockKernel {
    fn init_display(&mut self, brightness: u8) {
        self.brightness = Some(brightness);
        let _ = self.calls.push("init_display");
    }

    fn init_control(&mut self) {
        let _ = self.calls.push("init_control");
    }
}

/// Delay that only counts calls
#[derive(Default)]
pub struct MockDelay {
    pub calls: u32,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Raw X word whose high byte is `high`
pub fn x_with_high_byte(high: u8) -> u16 {
    (high as u16) << 8
}
