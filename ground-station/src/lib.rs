//! Ground station for the glider link.
//!
//! Reads a joystick, runs the control logic from `glider_core` at a fixed
//! rate and sends each command as a UDP datagram to the aircraft.
//!
//! # Features
//!
//! - **`gilrs`**: Joystick backend, required by the `ground-station` binary

pub mod error;
pub mod event_loop;
#[cfg(feature = "gilrs")]
pub mod joystick;
pub mod link;

pub use error::StationError;
pub use event_loop::{ButtonEvents, EventLoop, Step};
#[cfg(feature = "gilrs")]
pub use joystick::GilrsJoystick;
pub use link::{UdpCommandLink, AIRCRAFT_ADDR};
