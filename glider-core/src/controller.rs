//! Controller-side command generation.

use glider_proto::ActuatorCommand;

use crate::axis::ControlSample;
use crate::config::ControllerConfig;
use crate::engine::EngineState;
use crate::input::Joystick;
use crate::trim::{ButtonId, TrimAction, TrimState};

/// Turns control samples into actuator commands.
///
/// Owns the trim and engine state; nothing here touches the network or the
/// joystick device directly, so every tick is a plain function of the sample
/// and the state carried from previous ticks.
pub struct Controller {
    config: ControllerConfig,
    trim: TrimState,
    engine: EngineState,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            trim: config.initial_trim,
            engine: EngineState::new(),
            config,
        }
    }

    /// Read the configured axes from `joystick`.
    pub fn sample<J: Joystick>(&self, joystick: &mut J) -> ControlSample {
        ControlSample::read(joystick, &self.config.axes, self.config.pitch_scale)
    }

    /// Compute this tick's command.
    pub fn update(&mut self, sample: &ControlSample) -> ActuatorCommand {
        let deltas = sample.trimmed(&self.trim);
        let motor = self.engine.update(sample.throttle, &self.config.engine);
        let surfaces = self.config.surfaces.positions(&deltas);

        debug!(
            "P{} R{} E {} T:{} {} -> {} {} {} {}",
            sample.pitch,
            sample.roll,
            sample.throttle,
            self.trim.pitch_trim,
            self.trim.roll_trim,
            surfaces.surface_a,
            surfaces.surface_b,
            surfaces.surface_c,
            motor
        );

        ActuatorCommand::new(
            surfaces.surface_a,
            surfaces.surface_b,
            surfaces.surface_c,
            motor,
        )
    }

    /// Handle a button-down event.
    ///
    /// `sample` must be a fresh, untrimmed reading.
    pub fn handle_button(&mut self, button: ButtonId, sample: &ControlSample) -> Option<TrimAction> {
        let action = self.trim.handle_button(button, sample);
        match action {
            Some(TrimAction::TrimToCurrent) => {
                info!("Trimmed to pitch {} and roll {}", sample.pitch, sample.roll)
            }
            Some(TrimAction::Reset) => info!("Reset trim"),
            None => warn!("Unhandled button {}", button),
        }
        action
    }

    pub fn trim(&self) -> &TrimState {
        &self.trim
    }

    pub fn engine(&self) -> &EngineState {
        &self.engine
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CONTROLLER)
    }
}
