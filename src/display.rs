//! Bitmap display surface and the backend trait that makes it visible.
//!
//! The surface is 8 columns by 16 rows. Each row is one byte with bit 7 the
//! leftmost column and bit 0 the rightmost. All writes are bounds checked
//! before touching the buffer, so a bad coordinate never bleeds into a
//! neighbouring row.

/// Number of columns.
pub const COLUMNS: u8 = 8;
/// Number of rows.
pub const ROWS: u8 = 16;

/// Buffered display contents, upper row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    rows: [u8; ROWS as usize],
}

impl Frame {
    /// Creates a frame from raw row masks.
    pub const fn from_rows(rows: [u8; ROWS as usize]) -> Self {
        Self { rows }
    }

    /// All row masks, upper row first.
    pub const fn rows(&self) -> &[u8; ROWS as usize] {
        &self.rows
    }

    /// Mask of row `y`, or `None` if out of range.
    pub fn row(&self, y: u8) -> Option<u8> {
        self.rows.get(y as usize).copied()
    }

    /// State of pixel `(x, y)`, or `None` if out of range.
    pub fn pixel(&self, x: u8, y: u8) -> Option<PixelState> {
        if x >= COLUMNS {
            return None;
        }
        self.row(y).map(|mask| PixelState::from(mask & column_mask(x) != 0))
    }
}

/// On or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelState {
    Off,
    On,
}

impl From<bool> for PixelState {
    fn from(on: bool) -> Self {
        if on { PixelState::On } else { PixelState::Off }
    }
}

/// Display write errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Pixel coordinate outside the 8x16 grid.
    PixelOutOfBounds { x: u8, y: u8 },
    /// Row index outside 0..16.
    RowOutOfBounds { y: u8 },
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::PixelOutOfBounds { x, y } => {
                write!(f, "pixel ({}, {}) is outside the {}x{} display", x, y, COLUMNS, ROWS)
            }
            DisplayError::RowOutOfBounds { y } => {
                write!(f, "row {} is outside the {}-row display", y, ROWS)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

/// Trait for abstracting the display hardware.
///
/// Implement this for the kernel's scan buffer, a framebuffer, or an emulator
/// window. Neither method can fail; handle hardware errors internally.
pub trait DisplayBackend {
    /// Makes `frame` visible.
    ///
    /// Called after every visible change, possibly thousands of times per
    /// second, so it must be idempotent and must not accumulate resources.
    fn latch(&mut self, frame: &Frame);

    /// Shuts the display down. Called once when the animation ends.
    fn close(&mut self) {}
}

impl<B: DisplayBackend + ?Sized> DisplayBackend for &mut B {
    fn latch(&mut self, frame: &Frame) {
        (**self).latch(frame)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

#[inline]
const fn column_mask(x: u8) -> u8 {
    1 << (COLUMNS - 1 - x)
}

/// A [`Frame`] paired with the backend that displays it.
pub struct DisplaySurface<B: DisplayBackend> {
    frame: Frame,
    backend: B,
}

impl<B: DisplayBackend> DisplaySurface<B> {
    /// Creates a surface with every pixel off. Nothing is latched yet.
    pub fn new(backend: B) -> Self {
        Self {
            frame: Frame::default(),
            backend,
        }
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.frame = Frame::default();
    }

    /// Sets pixel `(x, y)` to `state`, touching only row `y`.
    pub fn set_pixel(&mut self, x: u8, y: u8, state: PixelState) -> Result<(), DisplayError> {
        if x >= COLUMNS || y >= ROWS {
            return Err(DisplayError::PixelOutOfBounds { x, y });
        }

        let row = &mut self.frame.rows[y as usize];
        match state {
            PixelState::On => *row |= column_mask(x),
            PixelState::Off => *row &= !column_mask(x),
        }
        Ok(())
    }

    /// Replaces the whole mask of row `y`.
    pub fn set_row(&mut self, y: u8, mask: u8) -> Result<(), DisplayError> {
        let row = self
            .frame
            .rows
            .get_mut(y as usize)
            .ok_or(DisplayError::RowOutOfBounds { y })?;
        *row = mask;
        Ok(())
    }

    /// Inverts every pixel of row `y`.
    pub fn toggle_row(&mut self, y: u8) -> Result<(), DisplayError> {
        let row = self
            .frame
            .rows
            .get_mut(y as usize)
            .ok_or(DisplayError::RowOutOfBounds { y })?;
        *row ^= 0xFF;
        Ok(())
    }

    /// Pushes the buffered frame to the backend.
    pub fn publish(&mut self) {
        self.backend.latch(&self.frame);
    }

    /// Closes the backend.
    pub fn close(&mut self) {
        self.backend.close();
    }

    /// Buffered contents, including changes not yet published.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the surface, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
