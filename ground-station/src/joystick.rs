//! Joystick adapter over gilrs.
//!
//! Axis and button indices follow the common SDL layout for Xbox-style pads,
//! and stick Y axes read negative when pushed forward.

use std::time::{Duration, Instant};

use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};
use glider_core::{ButtonId, Joystick};

use crate::error::StationError;
use crate::event_loop::ButtonEvents;

/// Axis order exposed through [`Joystick::read_axis`].
const AXES: [Axis; 6] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::LeftZ,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::RightZ,
];

/// Map a gilrs button to its numeric id.
pub fn button_id(button: Button) -> Option<ButtonId> {
    Some(match button {
        Button::South => 0,
        Button::East => 1,
        Button::West => 2,
        Button::North => 3,
        Button::LeftTrigger => 4,
        Button::RightTrigger => 5,
        Button::Select => 6,
        Button::Start => 7,
        Button::Mode => 8,
        Button::LeftThumb => 9,
        Button::RightThumb => 10,
        _ => return None,
    })
}

/// One opened gamepad.
pub struct GilrsJoystick {
    gilrs: Gilrs,
    id: GamepadId,
}

impl GilrsJoystick {
    /// Open the `index`-th connected gamepad.
    pub fn open(index: usize) -> Result<Self, StationError> {
        let gilrs = Gilrs::new().map_err(|e| StationError::Joystick(e.to_string()))?;

        let count = gilrs.gamepads().count();
        log::info!("Detected {} joysticks", count);

        let (id, gamepad) = gilrs
            .gamepads()
            .nth(index)
            .ok_or(StationError::NoJoystick(index))?;
        log::info!("Opening joystick: {}", gamepad.name());

        let joystick = Self { gilrs, id };
        log::info!("  AXES: {}", joystick.axis_count());
        Ok(joystick)
    }
}

impl Joystick for GilrsJoystick {
    fn axis_count(&self) -> usize {
        let gamepad = self.gilrs.gamepad(self.id);
        AXES.iter()
            .filter(|&&axis| gamepad.axis_code(axis).is_some())
            .count()
    }

    fn read_axis(&mut self, index: usize) -> f32 {
        let Some(&axis) = AXES.get(index) else {
            return 0.0;
        };
        let value = self.gilrs.gamepad(self.id).value(axis);
        match axis {
            Axis::LeftStickY | Axis::RightStickY => -value,
            _ => value,
        }
    }
}

impl ButtonEvents for GilrsJoystick {
    fn wait_button(&mut self, timeout: Duration) -> Option<ButtonId> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let event = self.gilrs.next_event_blocking(Some(remaining))?;
            if event.id != self.id {
                continue;
            }
            match event.event {
                EventType::ButtonPressed(button, _) => match button_id(button) {
                    Some(id) => return Some(id),
                    None => log::debug!("Ignoring unmapped button {:?}", button),
                },
                EventType::Disconnected => log::warn!("Joystick disconnected"),
                EventType::Connected => log::info!("Joystick reconnected"),
                _ => {}
            }
            if remaining.is_zero() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_buttons() {
        assert_eq!(button_id(Button::South), Some(0));
        assert_eq!(button_id(Button::East), Some(1));
        assert_eq!(button_id(Button::Mode), Some(8));
        assert_eq!(button_id(Button::DPadUp), None);
    }
}
