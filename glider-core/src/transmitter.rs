//! Transmitter: connects the joystick and controller to the command link.

use glider_proto::ActuatorCommand;

use crate::controller::Controller;
use crate::input::Joystick;
use crate::output::{CommandLink, OutputError};
use crate::trim::{ButtonId, TrimAction};

/// Samples the joystick each tick and sends the resulting command.
///
/// The transmitter does not own a clock. The caller invokes [`tick`] at the
/// configured update rate and [`on_button`] for every button-down event, one
/// at a time.
///
/// # Error Handling
///
/// Sending is best-effort. A failed send is logged and returned, but the
/// controller state has already advanced and the next tick supersedes the
/// lost command.
///
/// [`tick`]: Self::tick
/// [`on_button`]: Self::on_button
pub struct Transmitter<J, L> {
    joystick: J,
    link: L,
    controller: Controller,
}

impl<J: Joystick, L: CommandLink> Transmitter<J, L> {
    pub fn new(joystick: J, link: L, controller: Controller) -> Self {
        Self {
            joystick,
            link,
            controller,
        }
    }

    /// Send the neutral startup command.
    pub fn send_hello(&mut self) -> Result<(), OutputError> {
        self.send(&ActuatorCommand::HELLO)
    }

    /// Run one update tick.
    pub fn tick(&mut self) -> Result<ActuatorCommand, OutputError> {
        let sample = self.controller.sample(&mut self.joystick);
        let cmd = self.controller.update(&sample);
        self.send(&cmd)?;
        Ok(cmd)
    }

    /// Handle one button-down event.
    pub fn on_button(&mut self, button: ButtonId) -> Option<TrimAction> {
        let sample = self.controller.sample(&mut self.joystick);
        self.controller.handle_button(button, &sample)
    }

    fn send(&mut self, cmd: &ActuatorCommand) -> Result<(), OutputError> {
        self.link.send(&cmd.to_bytes()).inspect_err(|e| {
            warn!("Failed to send command: {:?}", e);
        })
    }

    pub fn joystick(&self) -> &J {
        &self.joystick
    }

    pub fn joystick_mut(&mut self) -> &mut J {
        &mut self.joystick
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Decompose the transmitter into its joystick and link.
    pub fn into_parts(self) -> (J, L) {
        (self.joystick, self.link)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use glider_proto::COMMAND_SIZE;
    use std::vec::Vec;

    struct MockJoystick {
        axes: [f32; 6],
    }

    impl MockJoystick {
        fn centered() -> Self {
            Self { axes: [0.0; 6] }
        }
    }

    impl Joystick for MockJoystick {
        fn axis_count(&self) -> usize {
            self.axes.len()
        }

        fn read_axis(&mut self, index: usize) -> f32 {
            self.axes.get(index).copied().unwrap_or(0.0)
        }
    }

    #[derive(Default)]
    struct MockLink {
        sent: Vec<Vec<u8>>,
        fail: bool,
    }

    impl CommandLink for MockLink {
        fn send(&mut self, datagram: &[u8]) -> Result<(), OutputError> {
            if self.fail {
                return Err(OutputError::Io);
            }
            self.sent.push(datagram.to_vec());
            Ok(())
        }
    }

    fn transmitter() -> Transmitter<MockJoystick, MockLink> {
        Transmitter::new(
            MockJoystick::centered(),
            MockLink::default(),
            Controller::default(),
        )
    }

    fn decoded(link: &MockLink) -> Vec<ActuatorCommand> {
        link.sent
            .iter()
            .map(|d| ActuatorCommand::decode(d).unwrap())
            .collect()
    }

    #[test]
    fn test_hello_is_neutral() {
        let mut tx = transmitter();
        tx.send_hello().unwrap();
        assert_eq!(decoded(tx.link()), [ActuatorCommand::new(140, 140, 140, 0)]);
    }

    #[test]
    fn test_tick_sends_one_datagram() {
        let mut tx = transmitter();
        let cmd = tx.tick().unwrap();
        assert_eq!(tx.link().sent.len(), 1);
        assert_eq!(tx.link().sent[0].len(), COMMAND_SIZE);
        assert_eq!(decoded(tx.link()), [cmd]);
        assert_eq!(cmd.toggle_a, 0);
        assert_eq!(cmd.toggle_b, 0);
    }

    #[test]
    fn test_arming_gesture_from_raw_axes() {
        let mut tx = transmitter();
        // Raw throttle axis is inverted: -1.0 is stick forward
        for raw in [-0.95, 0.95, -0.5] {
            tx.joystick_mut().axes[4] = raw;
            tx.tick().unwrap();
        }
        let motors: Vec<u16> = decoded(tx.link()).iter().map(|c| c.motor).collect();
        assert_eq!(motors, [0u16, 0, 21]);
    }

    #[test]
    fn test_trim_button_reads_current_sticks() {
        let mut tx = transmitter();
        // 1.0 raw pitch scales to 0.3
        tx.joystick_mut().axes[1] = 1.0;
        tx.joystick_mut().axes[0] = 0.1;
        assert_eq!(tx.on_button(0), Some(TrimAction::TrimToCurrent));
        let trim = tx.controller().trim();
        assert!((trim.pitch_trim - -0.1).abs() < 1e-6);
        assert!((trim.roll_trim - -0.1).abs() < 1e-6);
        // Buttons never transmit
        assert!(tx.link().sent.is_empty());
    }

    #[test]
    fn test_send_failure_still_advances_state() {
        let mut tx = Transmitter::new(
            MockJoystick::centered(),
            MockLink {
                fail: true,
                ..Default::default()
            },
            Controller::default(),
        );
        tx.joystick_mut().axes[4] = -0.95;
        assert_eq!(tx.tick(), Err(OutputError::Io));
        assert_eq!(
            tx.controller().engine().stage,
            crate::engine::EngineStage::HighChecked
        );
    }
}
