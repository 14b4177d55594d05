//! Joystick axes to normalized control deltas.

use crate::config::AxisMapping;
use crate::input::Joystick;
use crate::trim::TrimState;

/// One reading of the control axes.
///
/// `pitch` is already multiplied by the pitch sensitivity and `throttle` is
/// already inverted so that stick forward is positive.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlSample {
    pub pitch: f32,
    pub roll: f32,
    pub throttle: f32,
}

impl ControlSample {
    #[must_use]
    pub const fn new(pitch: f32, roll: f32, throttle: f32) -> Self {
        Self {
            pitch,
            roll,
            throttle,
        }
    }

    /// Read the mapped axes from `joystick`.
    pub fn read<J: Joystick>(joystick: &mut J, mapping: &AxisMapping, pitch_scale: f32) -> Self {
        let throttle = joystick.read_axis(mapping.throttle);
        Self {
            pitch: joystick.read_axis(mapping.pitch) * pitch_scale,
            roll: joystick.read_axis(mapping.roll),
            throttle: if mapping.invert_throttle {
                -throttle
            } else {
                throttle
            },
        }
    }

    /// Pitch and roll relative to the trimmed center.
    #[inline]
    #[must_use]
    pub fn trimmed(&self, trim: &TrimState) -> TrimmedDeltas {
        TrimmedDeltas {
            pitch: self.pitch - trim.pitch_trim,
            roll: self.roll - trim.roll_trim,
        }
    }
}

/// Pitch and roll after trim subtraction, input to the servo mixer.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrimmedDeltas {
    pub pitch: f32,
    pub roll: f32,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::DEFAULT_AXES;

    struct FixedAxes([f32; 6]);

    impl Joystick for FixedAxes {
        fn axis_count(&self) -> usize {
            self.0.len()
        }

        fn read_axis(&mut self, index: usize) -> f32 {
            self.0.get(index).copied().unwrap_or(0.0)
        }
    }

    #[test]
    fn test_read_scales_pitch_and_inverts_throttle() {
        let mut stick = FixedAxes([0.25, 1.0, 0.0, 0.0, -0.8, 0.0]);
        let sample = ControlSample::read(&mut stick, &DEFAULT_AXES, 0.3);
        assert!((sample.pitch - 0.3).abs() < 1e-6);
        assert_eq!(sample.roll, 0.25);
        assert_eq!(sample.throttle, 0.8);
    }

    #[test]
    fn test_read_without_inversion() {
        let mapping = AxisMapping {
            invert_throttle: false,
            ..DEFAULT_AXES
        };
        let mut stick = FixedAxes([0.0, 0.0, 0.0, 0.0, -0.8, 0.0]);
        assert_eq!(ControlSample::read(&mut stick, &mapping, 0.3).throttle, -0.8);
    }

    #[test]
    fn test_trimmed_subtracts_offsets() {
        let sample = ControlSample::new(0.3, 0.1, 0.0);
        let deltas = sample.trimmed(&TrimState::new(0.2, -0.1));
        assert!((deltas.pitch - 0.1).abs() < 1e-6);
        assert!((deltas.roll - 0.2).abs() < 1e-6);
    }
}
