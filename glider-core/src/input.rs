//! Input seams: the joystick on the controller, the datagram socket onboard.

use core::future::Future;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Socket/communication I/O error.
    Io,
    /// Datagram did not fit the receive buffer.
    Truncated,
    /// Socket not bound or device gone.
    Disconnected,
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::Truncated => write!(f, "datagram truncated"),
            Self::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Joystick axis reader.
///
/// Axis values are in `[-1.0, 1.0]` with the raw device convention: pushing a
/// stick forward reads negative. The device is expected to be opened before
/// the control loop starts.
pub trait Joystick {
    /// Number of axes the device reports.
    fn axis_count(&self) -> usize;

    /// Current position of axis `index`.
    ///
    /// Returns 0.0 for axes the device does not have.
    fn read_axis(&mut self, index: usize) -> f32;
}

/// Async source of raw command datagrams.
///
/// Implementations wait for the next datagram without any timeout; the link
/// watchdog covers silence on an independent clock.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait DatagramSource {
    /// Wait for the next datagram and copy it into `buf`.
    ///
    /// Returns the datagram length.
    fn receive(&mut self, buf: &mut [u8]) -> impl Future<Output = Result<usize, InputError>>;
}
