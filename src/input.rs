//! Edge-triggered button input.
//!
//! The kernel debounces the buttons and latches one bit per key into an edge
//! mask. The reader takes the whole mask at once and reports at most one
//! event, so simultaneous edges collapse to the highest-priority key.
//!
//! Only the four direction keys are decoded from the mask. ESCAPE never comes
//! from a key edge; it is reported by collaborators that speak the numeric
//! button codes (an emulator closing its window, for example) through
//! [`CodeInput`].

use crate::shared::SharedState;

/// Edge mask bit of the power key. Handled by the kernel, never decoded.
pub const KEY_POWER_BIT: u8 = 0;
/// Edge mask bit of the left key.
pub const KEY_LEFT_BIT: u8 = 1;
/// Edge mask bit of the up key.
pub const KEY_UP_BIT: u8 = 2;
/// Edge mask bit of the down key.
pub const KEY_DOWN_BIT: u8 = 3;
/// Edge mask bit of the right key.
pub const KEY_RIGHT_BIT: u8 = 4;

/// Decode order. First set bit wins, the rest are dropped.
const PRIORITY: [(u8, ButtonEvent); 4] = [
    (KEY_LEFT_BIT, ButtonEvent::Left),
    (KEY_RIGHT_BIT, ButtonEvent::Right),
    (KEY_UP_BIT, ButtonEvent::Up),
    (KEY_DOWN_BIT, ButtonEvent::Down),
];

/// A single discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// No new edge since the last poll.
    #[default]
    None,
    Left,
    Up,
    Down,
    Right,
    /// Leave the animation loop.
    Escape,
}

impl ButtonEvent {
    /// Numeric code used by the kernel and emulator collaborators.
    pub const fn code(self) -> u8 {
        match self {
            ButtonEvent::None => 0,
            ButtonEvent::Left => 1,
            ButtonEvent::Up => 2,
            ButtonEvent::Down => 3,
            ButtonEvent::Right => 4,
            ButtonEvent::Escape => 5,
        }
    }

    /// Decodes a collaborator code. Unknown codes read as [`ButtonEvent::None`].
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => ButtonEvent::Left,
            2 => ButtonEvent::Up,
            3 => ButtonEvent::Down,
            4 => ButtonEvent::Right,
            5 => ButtonEvent::Escape,
            _ => ButtonEvent::None,
        }
    }

    /// The movement this event requests, if any.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            ButtonEvent::Left => Some(Direction::Left),
            ButtonEvent::Up => Some(Direction::Up),
            ButtonEvent::Down => Some(Direction::Down),
            ButtonEvent::Right => Some(Direction::Right),
            ButtonEvent::None | ButtonEvent::Escape => None,
        }
    }
}

/// A one-cell movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Left,
    Up,
    Down,
    Right,
}

/// Decodes a key edge mask to the highest-priority event.
pub fn decode_key_edges(mask: u8) -> ButtonEvent {
    PRIORITY
        .iter()
        .find(|&&(bit, _)| mask & (1 << bit) != 0)
        .map(|&(_, event)| event)
        .unwrap_or(ButtonEvent::None)
}

/// Trait for abstracting button input.
///
/// `poll` is destructive: an event is returned at most once.
pub trait InputSource {
    fn poll(&mut self) -> ButtonEvent;
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn poll(&mut self) -> ButtonEvent {
        (**self).poll()
    }
}

/// Input reader over the kernel's key edge mask.
pub struct EdgeInput<'a> {
    shared: &'a SharedState,
}

impl<'a> EdgeInput<'a> {
    pub fn new(shared: &'a SharedState) -> Self {
        Self { shared }
    }
}

impl InputSource for EdgeInput<'_> {
    fn poll(&mut self) -> ButtonEvent {
        decode_key_edges(self.shared.take_key_edges())
    }
}

/// Input reader over a collaborator that returns the last pressed button as
/// a numeric code and forgets it on read.
///
/// ```ignore
/// let input = CodeInput::new(|| emulator.get_control());
/// ```
pub struct CodeInput<F: FnMut() -> u8> {
    get_control: F,
}

impl<F: FnMut() -> u8> CodeInput<F> {
    pub fn new(get_control: F) -> Self {
        Self { get_control }
    }
}

impl<F: FnMut() -> u8> InputSource for CodeInput<F> {
    fn poll(&mut self) -> ButtonEvent {
        ButtonEvent::from_code((self.get_control)())
    }
}
