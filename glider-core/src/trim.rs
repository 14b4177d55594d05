//! Pitch/roll trim offsets and the buttons that adjust them.

use crate::axis::ControlSample;

/// Identifier of a joystick button as reported by the device.
pub type ButtonId = u8;

/// Persistent pitch/roll offsets subtracted from every sample.
///
/// Trim values use the same units as [`ControlSample`], so the pitch trim
/// already includes the pitch sensitivity scale.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrimState {
    pub pitch_trim: f32,
    pub roll_trim: f32,
}

impl TrimState {
    #[must_use]
    pub const fn new(pitch_trim: f32, roll_trim: f32) -> Self {
        Self {
            pitch_trim,
            roll_trim,
        }
    }

    /// Make the current stick position the new logical center.
    ///
    /// `sample` must be the untrimmed reading.
    pub fn trim_to_current(&mut self, sample: &ControlSample) {
        self.pitch_trim -= sample.pitch;
        self.roll_trim -= sample.roll;
    }

    /// Clear both offsets.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply the action bound to `button`.
    ///
    /// Returns `None` and leaves the trims untouched for unbound buttons.
    pub fn handle_button(&mut self, button: ButtonId, sample: &ControlSample) -> Option<TrimAction> {
        let action = TrimAction::from_button(button)?;
        match action {
            TrimAction::TrimToCurrent => self.trim_to_current(sample),
            TrimAction::Reset => self.reset(),
        }
        Some(action)
    }
}

/// Trim operation bound to a joystick button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrimAction {
    /// Button 0.
    TrimToCurrent,
    /// Button 1.
    Reset,
}

impl TrimAction {
    pub const TRIM_BUTTON: ButtonId = 0;
    pub const RESET_BUTTON: ButtonId = 1;

    #[must_use]
    pub const fn from_button(button: ButtonId) -> Option<Self> {
        match button {
            Self::TRIM_BUTTON => Some(Self::TrimToCurrent),
            Self::RESET_BUTTON => Some(Self::Reset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_trim_to_current() {
        let mut trim = TrimState::new(0.2, 0.0);
        trim.trim_to_current(&ControlSample::new(0.3, 0.1, 0.0));
        assert_close(trim.pitch_trim, -0.1);
        assert_close(trim.roll_trim, -0.1);
    }

    #[test]
    fn test_reset_clears_any_trim() {
        let mut trim = TrimState::new(-0.7, 0.45);
        trim.reset();
        assert_eq!(trim, TrimState::new(0.0, 0.0));
    }

    #[test]
    fn test_button_bindings() {
        let sample = ControlSample::new(0.1, -0.2, 0.0);
        let mut trim = TrimState::default();

        assert_eq!(
            trim.handle_button(0, &sample),
            Some(TrimAction::TrimToCurrent)
        );
        assert_close(trim.pitch_trim, -0.1);
        assert_close(trim.roll_trim, 0.2);

        assert_eq!(trim.handle_button(1, &sample), Some(TrimAction::Reset));
        assert_eq!(trim, TrimState::default());
    }

    #[test]
    fn test_unknown_button_changes_nothing() {
        let mut trim = TrimState::new(0.2, 0.1);
        for button in [2, 3, 7, ButtonId::MAX] {
            assert_eq!(
                trim.handle_button(button, &ControlSample::new(0.5, 0.5, 0.5)),
                None
            );
        }
        assert_eq!(trim, TrimState::new(0.2, 0.1));
    }
}
