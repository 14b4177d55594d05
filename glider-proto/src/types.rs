//! The actuator command carried by every link datagram.

/// One tick's worth of actuator positions.
///
/// The three surface values and the motor value are written verbatim as PWM
/// duty cycles by the receiver. The toggle flags are carried for auxiliary
/// outputs; the controller currently always sends them as zero.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorCommand {
    /// Right wing surface.
    pub surface_a: u16,
    /// Left wing surface.
    pub surface_b: u16,
    /// Tail surface.
    pub surface_c: u16,
    /// Motor power (0-1023).
    pub motor: u16,
    pub toggle_a: u8,
    pub toggle_b: u8,
}

impl ActuatorCommand {
    /// Create a command with both toggles cleared.
    #[must_use]
    pub const fn new(surface_a: u16, surface_b: u16, surface_c: u16, motor: u16) -> Self {
        Self {
            surface_a,
            surface_b,
            surface_c,
            motor,
            toggle_a: 0,
            toggle_b: 0,
        }
    }

    /// Command sent once by the controller before its first tick.
    ///
    /// Moves all surfaces to a mid position with the motor off.
    pub const HELLO: Self = Self::new(140, 140, 140, 0);

    /// The four duty-cycle values in channel order (A, B, C, motor).
    #[inline]
    #[must_use]
    pub const fn duties(&self) -> [u16; 4] {
        [self.surface_a, self.surface_b, self.surface_c, self.motor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clears_toggles() {
        let cmd = ActuatorCommand::new(1, 2, 3, 4);
        assert_eq!(cmd.toggle_a, 0);
        assert_eq!(cmd.toggle_b, 0);
    }

    #[test]
    fn test_duties_channel_order() {
        let cmd = ActuatorCommand::new(10, 20, 30, 40);
        assert_eq!(cmd.duties(), [10, 20, 30, 40]);
    }

    #[test]
    fn test_hello_has_motor_off() {
        assert_eq!(ActuatorCommand::HELLO.motor, 0);
        assert_eq!(ActuatorCommand::HELLO.surface_a, 140);
    }
}
