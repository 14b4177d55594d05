//! Actuator command type and wire format for the glider link.
//!
//! The controller sends one [`ActuatorCommand`] per update tick as a single
//! UDP datagram; the onboard receiver decodes it and writes the four actuator
//! values straight to its PWM channels.
//!
//! # Wire Format
//!
//! A fixed, packed, little-endian layout with no framing and no checksum:
//!
//! ```text
//! offset  size  field
//!      0     2  surface_a  (u16)
//!      2     2  surface_b  (u16)
//!      4     2  surface_c  (u16)
//!      6     2  motor      (u16)
//!      8     1  toggle_a   (u8)
//!      9     1  toggle_b   (u8)
//! ```
//!
//! Datagrams of any other length are rejected.
//!
//! # Example
//!
//! ```
//! use glider_proto::{ActuatorCommand, COMMAND_SIZE};
//!
//! let cmd = ActuatorCommand::new(132, 177, 190, 0);
//! let bytes = cmd.to_bytes();
//! assert_eq!(bytes.len(), COMMAND_SIZE);
//! assert_eq!(ActuatorCommand::decode(&bytes), Ok(cmd));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod codec;
pub mod types;

pub use codec::{DecodeError, EncodeError, COMMAND_SIZE};
pub use types::ActuatorCommand;

/// UDP port the onboard receiver listens on.
pub const LINK_PORT: u16 = 4242;
