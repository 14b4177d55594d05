//! UDP command link towards the aircraft.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

use glider_core::{CommandLink, OutputError, LINK_PORT};

use crate::error::StationError;

/// Address of the onboard access point.
pub const AIRCRAFT_ADDR: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(192, 168, 4, 1), LINK_PORT);

/// Sends each command as one datagram to a fixed destination.
pub struct UdpCommandLink {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl UdpCommandLink {
    /// Open an ephemeral local socket aimed at `destination`.
    ///
    /// Broadcast is enabled so the destination may be a broadcast address.
    pub fn open(destination: impl Into<SocketAddr>) -> Result<Self, StationError> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.set_broadcast(true)?;
        let destination = destination.into();
        log::info!(
            "Sending commands from {} to {}",
            socket.local_addr()?,
            destination
        );
        Ok(Self {
            socket,
            destination,
        })
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl CommandLink for UdpCommandLink {
    fn send(&mut self, datagram: &[u8]) -> Result<(), OutputError> {
        match self.socket.send_to(datagram, self.destination) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::debug!("send_to {} failed: {}", self.destination, e);
                Err(match e.kind() {
                    io::ErrorKind::AddrNotAvailable
                    | io::ErrorKind::NetworkUnreachable
                    | io::ErrorKind::HostUnreachable
                    | io::ErrorKind::NotConnected => OutputError::NotReady,
                    _ => OutputError::Io,
                })
            }
        }
    }
}
