//! Output seams: the command link on the controller, PWM channels onboard.

use embedded_hal::pwm::SetDutyCycle;
use glider_proto::ActuatorCommand;

use crate::config::DUTY_FULL_SCALE;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Socket/communication I/O error.
    Io,
    /// Link not ready (e.g., network down).
    NotReady,
    /// PWM peripheral rejected a duty cycle.
    Pwm,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::NotReady => write!(f, "link not ready"),
            Self::Pwm => write!(f, "PWM write failed"),
        }
    }
}

/// Fire-and-forget datagram sink towards the aircraft.
///
/// There is no acknowledgment; a successful return only means the datagram
/// was handed to the network.
pub trait CommandLink {
    fn send(&mut self, datagram: &[u8]) -> Result<(), OutputError>;
}

/// The four onboard PWM outputs, in wire order.
///
/// Each channel is any [`SetDutyCycle`] implementation already configured
/// for [`PWM_FREQUENCY_HZ`](crate::config::PWM_FREQUENCY_HZ). Command values
/// are taken on a [`DUTY_FULL_SCALE`] scale and saturate at full duty.
pub struct Actuators<P> {
    channels: [P; 4],
}

impl<P: SetDutyCycle> Actuators<P> {
    /// Index of the motor channel.
    pub const MOTOR: usize = 3;

    /// Wrap channels ordered surface A, surface B, surface C, motor.
    pub fn new(channels: [P; 4]) -> Self {
        Self { channels }
    }

    /// Write all four duty values from `cmd`.
    ///
    /// Every channel is written even if an earlier one fails; the first error
    /// is returned.
    pub fn apply(&mut self, cmd: &ActuatorCommand) -> Result<(), OutputError> {
        let mut result = Ok(());
        for (channel, duty) in self.channels.iter_mut().zip(cmd.duties()) {
            let written = Self::write(channel, duty);
            if result.is_ok() {
                result = written;
            }
        }
        result
    }

    /// Force the motor channel to zero duty, leaving the surfaces in place.
    pub fn cut_motor(&mut self) -> Result<(), OutputError> {
        Self::write(&mut self.channels[Self::MOTOR], 0)
    }

    /// Channel `index` (0-3).
    pub fn channel(&self, index: usize) -> Option<&P> {
        self.channels.get(index)
    }

    pub fn into_channels(self) -> [P; 4] {
        self.channels
    }

    fn write(channel: &mut P, duty: u16) -> Result<(), OutputError> {
        channel
            .set_duty_cycle_fraction(duty.min(DUTY_FULL_SCALE), DUTY_FULL_SCALE)
            .map_err(|_| OutputError::Pwm)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{BrokenPwm, MockPwm};
    use super::*;

    fn duties(actuators: &Actuators<MockPwm>) -> [u16; 4] {
        core::array::from_fn(|i| actuators.channel(i).unwrap().duty)
    }

    #[test]
    fn test_apply_writes_channels_in_order() {
        let mut actuators = Actuators::new([MockPwm::default(); 4]);
        actuators
            .apply(&ActuatorCommand::new(132, 177, 190, 21))
            .unwrap();
        assert_eq!(duties(&actuators), [132, 177, 190, 21]);
    }

    #[test]
    fn test_apply_saturates_at_full_scale() {
        let mut actuators = Actuators::new([MockPwm::default(); 4]);
        actuators
            .apply(&ActuatorCommand::new(u16::MAX, 1024, 1023, 5000))
            .unwrap();
        assert_eq!(duties(&actuators), [1024, 1024, 1023, 1024]);
    }

    #[test]
    fn test_cut_motor_leaves_surfaces() {
        let mut actuators = Actuators::new([MockPwm::default(); 4]);
        actuators
            .apply(&ActuatorCommand::new(100, 110, 120, 900))
            .unwrap();
        actuators.cut_motor().unwrap();
        assert_eq!(duties(&actuators), [100, 110, 120, 0]);
    }

    #[test]
    fn test_pwm_error_is_reported() {
        let mut actuators = Actuators::new([BrokenPwm, BrokenPwm, BrokenPwm, BrokenPwm]);
        assert_eq!(
            actuators.apply(&ActuatorCommand::HELLO),
            Err(OutputError::Pwm)
        );
        assert_eq!(actuators.cut_motor(), Err(OutputError::Pwm));
    }
}
