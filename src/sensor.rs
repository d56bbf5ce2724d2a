//! Accelerometer sampling.

/// Accelerometer axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Rotate left is lower, rotate right is higher.
    X,
    /// Nose down is lower, nose up is higher.
    Y,
    /// Face down is lower, face up is higher.
    Z,
}

/// One raw triaxial reading as produced by the kernel.
///
/// Each axis is a 16-bit word of which only the 11 most significant bits carry
/// data. No unit conversion is done; consumers compare raw magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl AccelSample {
    /// Number of meaningful bits per axis.
    pub const DATA_BITS: u32 = 11;

    /// Creates a sample from raw axis words.
    pub const fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }

    /// Raw 16-bit word for `axis`.
    pub const fn raw(&self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// High byte of `axis`, the 8-bit view the kernel exposes.
    pub const fn high_byte(&self, axis: Axis) -> u8 {
        (self.raw(axis) >> 8) as u8
    }

    /// The 11 meaningful bits of `axis`, right aligned.
    pub const fn data(&self, axis: Axis) -> u16 {
        self.raw(axis) >> (16 - Self::DATA_BITS)
    }
}

/// Errors reported by an accelerometer collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No accelerometer is fitted or it never produced a sample.
    NotPresent,
    /// The read was attempted but failed.
    ReadFailed,
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorError::NotPresent => write!(f, "accelerometer not present"),
            SensorError::ReadFailed => write!(f, "accelerometer read failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SensorError {}

/// Trait for abstracting accelerometer hardware.
///
/// `poll` may block briefly while the kernel performs the read, but must not
/// wait on user input.
pub trait Accelerometer {
    /// Requests a fresh sample.
    fn poll(&mut self) -> Result<AccelSample, SensorError>;
}

impl<A: Accelerometer + ?Sized> Accelerometer for &mut A {
    fn poll(&mut self) -> Result<AccelSample, SensorError> {
        (**self).poll()
    }
}

/// Accelerometer backed by the kernel's read routine and the sample it
/// stores in [`SharedState`].
///
/// Each [`poll`](Accelerometer::poll) first calls `request_read`, which must
/// make the kernel perform a fresh (bounded, blocking) read and store it with
/// [`SharedState::store_accel`], then returns the stored sample.
///
/// ```ignore
/// let accel = KernelAccel::new(&KERNEL, || kernel::poll_accel(&KERNEL));
/// ```
///
/// [`SharedState`]: crate::shared::SharedState
/// [`SharedState::store_accel`]: crate::shared::SharedState::store_accel
pub struct KernelAccel<'a, R: FnMut()> {
    shared: &'a crate::shared::SharedState,
    request_read: R,
}

impl<'a, R: FnMut()> KernelAccel<'a, R> {
    pub fn new(shared: &'a crate::shared::SharedState, request_read: R) -> Self {
        Self {
            shared,
            request_read,
        }
    }
}

impl<R: FnMut()> Accelerometer for KernelAccel<'_, R> {
    fn poll(&mut self) -> Result<AccelSample, SensorError> {
        (self.request_read)();
        self.shared.accel().ok_or(SensorError::NotPresent)
    }
}

/// Reads an [`Accelerometer`] and remembers the last good sample.
pub struct SensorReader<A: Accelerometer> {
    accel: A,
    last: AccelSample,
}

impl<A: Accelerometer> SensorReader<A> {
    /// Creates a reader whose fallback sample is all zeroes.
    pub fn new(accel: A) -> Self {
        Self {
            accel,
            last: AccelSample::default(),
        }
    }

    /// Requests a fresh sample. Successful reads replace the fallback.
    pub fn poll(&mut self) -> Result<AccelSample, SensorError> {
        let sample = self.accel.poll()?;
        self.last = sample;
        Ok(sample)
    }

    /// Polls, substituting the last known sample if the read fails.
    pub fn sample_or_last(&mut self) -> AccelSample {
        match self.poll() {
            Ok(sample) => sample,
            Err(err) => {
                warn!("accelerometer unavailable ({}), reusing last sample", err);
                self.last
            }
        }
    }

    /// Returns the last good sample, or the zero sample if none arrived yet.
    pub fn last(&self) -> AccelSample {
        self.last
    }
}
