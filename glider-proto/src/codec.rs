//! Fixed-layout binary encoding of [`ActuatorCommand`].
//!
//! See the crate documentation for the byte layout.

use crate::types::ActuatorCommand;

/// Size of an encoded command in bytes.
pub const COMMAND_SIZE: usize = 10;

/// Error type for encoding operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The output buffer is too small to hold an encoded command.
    BufferTooSmall,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

/// Error type for decoding operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The datagram length does not match [`COMMAND_SIZE`].
    WrongLength(usize),
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WrongLength(len) => {
                write!(f, "expected {} bytes, got {}", COMMAND_SIZE, len)
            }
        }
    }
}

#[inline]
fn read_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

impl ActuatorCommand {
    /// Encode into a fixed-size array.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; COMMAND_SIZE] {
        let mut out = [0u8; COMMAND_SIZE];
        out[0..2].copy_from_slice(&self.surface_a.to_le_bytes());
        out[2..4].copy_from_slice(&self.surface_b.to_le_bytes());
        out[4..6].copy_from_slice(&self.surface_c.to_le_bytes());
        out[6..8].copy_from_slice(&self.motor.to_le_bytes());
        out[8] = self.toggle_a;
        out[9] = self.toggle_b;
        out
    }

    /// Encode into the provided buffer.
    ///
    /// Returns the number of bytes written (always [`COMMAND_SIZE`]).
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferTooSmall`] if `buf` is shorter than
    /// [`COMMAND_SIZE`].
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let dst = buf
            .get_mut(..COMMAND_SIZE)
            .ok_or(EncodeError::BufferTooSmall)?;
        dst.copy_from_slice(&self.to_bytes());
        Ok(COMMAND_SIZE)
    }

    /// Decode a received datagram.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::WrongLength`] unless `buf` is exactly
    /// [`COMMAND_SIZE`] bytes long.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() != COMMAND_SIZE {
            return Err(DecodeError::WrongLength(buf.len()));
        }

        Ok(Self {
            surface_a: read_u16(buf, 0),
            surface_b: read_u16(buf, 2),
            surface_c: read_u16(buf, 4),
            motor: read_u16(buf, 6),
            toggle_a: buf[8],
            toggle_b: buf[9],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_little_endian() {
        let cmd = ActuatorCommand {
            surface_a: 0x0102,
            surface_b: 0x0304,
            surface_c: 0x0506,
            motor: 0x0708,
            toggle_a: 0x09,
            toggle_b: 0x0A,
        };
        assert_eq!(
            cmd.to_bytes(),
            [0x02, 0x01, 0x04, 0x03, 0x06, 0x05, 0x08, 0x07, 0x09, 0x0A]
        );
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let cmd = ActuatorCommand {
            surface_a: 176,
            surface_b: 92,
            surface_c: 254,
            motor: 1023,
            toggle_a: 1,
            toggle_b: 255,
        };
        assert_eq!(ActuatorCommand::decode(&cmd.to_bytes()), Ok(cmd));
    }

    #[test]
    fn test_encode_into_larger_buffer() {
        let cmd = ActuatorCommand::new(132, 177, 190, 21);
        let mut buf = [0xFFu8; 16];
        let len = cmd.encode(&mut buf).unwrap();
        assert_eq!(len, COMMAND_SIZE);
        assert_eq!(ActuatorCommand::decode(&buf[..len]), Ok(cmd));
        // Bytes past the command are untouched
        assert_eq!(buf[COMMAND_SIZE], 0xFF);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let cmd = ActuatorCommand::default();
        let mut buf = [0u8; COMMAND_SIZE - 1];
        assert_eq!(cmd.encode(&mut buf), Err(EncodeError::BufferTooSmall));
    }

    #[test]
    fn test_decode_rejects_short_datagram() {
        assert_eq!(
            ActuatorCommand::decode(&[0u8; 8]),
            Err(DecodeError::WrongLength(8))
        );
        assert_eq!(ActuatorCommand::decode(&[]), Err(DecodeError::WrongLength(0)));
    }

    #[test]
    fn test_decode_rejects_long_datagram() {
        assert_eq!(
            ActuatorCommand::decode(&[0u8; 12]),
            Err(DecodeError::WrongLength(12))
        );
    }

    #[test]
    fn test_decode_error_display() {
        extern crate std;
        use std::string::ToString;
        assert_eq!(
            DecodeError::WrongLength(3).to_string(),
            "expected 10 bytes, got 3"
        );
    }
}
