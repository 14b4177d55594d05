//! UDP datagram source for receiving actuator commands.
//!
//! Wraps a bound embassy-net [`UdpSocket`]. Each call to
//! [`DatagramSource::receive`] waits, without a timeout, for the next
//! datagram from any peer.

use embassy_net::udp::{BindError, RecvError, UdpSocket};
use glider_core::{DatagramSource, InputError};

/// Convert socket receive errors to [`InputError`].
#[inline]
fn recv_error_to_input_error(e: RecvError) -> InputError {
    match e {
        RecvError::Truncated => InputError::Truncated,
        #[allow(unreachable_patterns)]
        _ => InputError::Io,
    }
}

/// UDP input source for command datagrams.
pub struct UdpInputSource<'d> {
    socket: UdpSocket<'d>,
}

impl<'d> UdpInputSource<'d> {
    /// Bind `socket` to `port` on all interfaces.
    pub fn bind(mut socket: UdpSocket<'d>, port: u16) -> Result<Self, BindError> {
        socket.bind(port)?;
        Ok(Self { socket })
    }
}

impl DatagramSource for UdpInputSource<'_> {
    async fn receive(&mut self, buf: &mut [u8]) -> Result<usize, InputError> {
        let (len, _meta) = self
            .socket
            .recv_from(buf)
            .await
            .map_err(recv_error_to_input_error)?;
        Ok(len)
    }
}
