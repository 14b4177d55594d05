//! Engine arming gesture, power ramp and kill switch.
//!
//! The motor stays off until the throttle stick has been pushed fully forward
//! and then pulled fully back. Once armed, throttle past a small deadband ramps
//! power up, reverse throttle ramps it down, and slamming the stick fully back
//! kills power and holds it at zero for a cooldown window.
//!
//! ```text
//!        t > 0.9              t < -0.9
//! Idle ----------> HighChecked ----------> Armed
//! ```

#[cfg(not(feature = "std"))]
use micromath::F32Ext;

use crate::config::EngineConfig;

/// Arming progress.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineStage {
    /// Waiting for the high range check.
    #[default]
    Idle,
    /// High range check passed, waiting for the low range check.
    HighChecked,
    /// Power follows the throttle ramp.
    Armed,
}

/// Engine state owned by the controller.
///
/// `power` is always within `0..=EngineConfig::MAX_POWER`. The stage never
/// moves backwards; a kill only zeroes power and starts the cutoff window.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineState {
    pub stage: EngineStage,
    pub power: u16,
    /// Remaining ticks of forced-zero output.
    pub cutoff_delay_ticks: u16,
}

impl EngineState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stage: EngineStage::Idle,
            power: 0,
            cutoff_delay_ticks: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        matches!(self.stage, EngineStage::Armed)
    }

    /// Advance one tick with the current throttle and return the power to send.
    pub fn update(&mut self, throttle: f32, config: &EngineConfig) -> u16 {
        if self.cutoff_delay_ticks > 0 {
            self.cutoff_delay_ticks -= 1;
            return 0;
        }

        let mut power = i32::from(self.power);

        match self.stage {
            EngineStage::Idle if throttle > config.high_check => {
                self.stage = EngineStage::HighChecked;
                info!("ENGINE: high range check OK");
            }
            EngineStage::HighChecked if throttle < config.low_check => {
                self.stage = EngineStage::Armed;
                info!("ENGINE: low range check OK, engine enabled");
            }
            EngineStage::Armed => {
                if throttle < config.kill {
                    self.cutoff_delay_ticks = config.cutoff_ticks();
                    power = 0;
                    warn!("ENGINE: emergency stop");
                } else if throttle > config.ramp_up_deadband {
                    power += (config.ramp_up_step() * (throttle - config.ramp_up_deadband)).round()
                        as i32;
                } else if throttle < 0.0 {
                    power += (config.ramp_down_step() * throttle).round() as i32;
                }
            }
            _ => {}
        }

        self.power = power.clamp(0, i32::from(EngineConfig::MAX_POWER)) as u16;
        self.power
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENGINE;

    fn run(engine: &mut EngineState, throttles: &[f32]) -> u16 {
        let mut power = 0;
        for &t in throttles {
            power = engine.update(t, &DEFAULT_ENGINE);
        }
        power
    }

    fn armed() -> EngineState {
        let mut engine = EngineState::new();
        run(&mut engine, &[0.95, -0.95]);
        assert!(engine.is_armed());
        engine
    }

    #[test]
    fn test_arming_sequence_then_ramp() {
        let mut engine = EngineState::new();

        assert_eq!(engine.update(0.95, &DEFAULT_ENGINE), 0);
        assert_eq!(engine.stage, EngineStage::HighChecked);

        assert_eq!(engine.update(-0.95, &DEFAULT_ENGINE), 0);
        assert_eq!(engine.stage, EngineStage::Armed);

        // round((1 + 1023 / 20) * 0.4) = round(20.86)
        assert_eq!(engine.update(0.5, &DEFAULT_ENGINE), 21);
    }

    #[test]
    fn test_full_throttle_without_gesture_stays_off() {
        let mut engine = EngineState::new();
        for _ in 0..200 {
            assert_eq!(engine.update(1.0, &DEFAULT_ENGINE), 0);
        }
        assert_eq!(engine.stage, EngineStage::HighChecked);
    }

    #[test]
    fn test_low_before_high_does_not_arm() {
        let mut engine = EngineState::new();
        let seq = [-1.0, -0.95, 0.0, 0.5, 0.89, 0.3, -0.95, 0.5];
        for &t in &seq {
            assert_eq!(engine.update(t, &DEFAULT_ENGINE), 0);
        }
        assert_eq!(engine.stage, EngineStage::Idle);
    }

    #[test]
    fn test_high_check_requires_strictly_above_threshold() {
        let mut engine = EngineState::new();
        engine.update(0.9, &DEFAULT_ENGINE);
        assert_eq!(engine.stage, EngineStage::Idle);
    }

    #[test]
    fn test_deadband_holds_power() {
        let mut engine = armed();
        engine.update(0.5, &DEFAULT_ENGINE);
        let held = engine.power;
        assert_eq!(run(&mut engine, &[0.0, 0.05, 0.1]), held);
    }

    #[test]
    fn test_ramp_down() {
        let mut engine = armed();
        run(&mut engine, &[1.0; 10]);
        let before = engine.power;
        // round(103.3 * -0.5) = -52
        assert_eq!(engine.update(-0.5, &DEFAULT_ENGINE), before - 52);
    }

    #[test]
    fn test_power_clamped_at_max() {
        let mut engine = armed();
        for _ in 0..1000 {
            let power = engine.update(1.0, &DEFAULT_ENGINE);
            assert!(power <= EngineConfig::MAX_POWER);
        }
        assert_eq!(engine.power, EngineConfig::MAX_POWER);
    }

    #[test]
    fn test_power_clamped_at_zero() {
        let mut engine = armed();
        run(&mut engine, &[0.3, 0.3]);
        assert_eq!(run(&mut engine, &[-0.97; 5]), 0);
        assert_eq!(engine.cutoff_delay_ticks, 0);
    }

    #[test]
    fn test_emergency_stop_window() {
        let mut engine = armed();
        run(&mut engine, &[1.0; 20]);
        assert!(engine.power > 0);

        assert_eq!(engine.update(-1.0, &DEFAULT_ENGINE), 0);
        assert_eq!(engine.cutoff_delay_ticks, 40);

        // Full throttle during the window is ignored and the countdown
        // drops by one each tick
        for expected in (0..40).rev() {
            assert_eq!(engine.update(1.0, &DEFAULT_ENGINE), 0);
            assert_eq!(engine.cutoff_delay_ticks, expected);
        }

        // Still armed afterwards, ramping from zero
        assert!(engine.is_armed());
        assert_eq!(engine.update(0.5, &DEFAULT_ENGINE), 21);
    }

    #[test]
    fn test_arming_gesture_to_full_reverse_arms_without_kill() {
        let mut engine = EngineState::new();
        run(&mut engine, &[1.0, -1.0]);
        assert!(engine.is_armed());
        assert_eq!(engine.cutoff_delay_ticks, 0);
    }

    #[test]
    fn test_adversarial_sequence_stays_in_range() {
        let mut engine = EngineState::new();
        let pattern = [1.0, -1.0, 1.0, 1.0, -0.99, 0.2, -0.5, 1.0, -1.0, 0.7];
        for i in 0..500 {
            let power = engine.update(pattern[i % pattern.len()], &DEFAULT_ENGINE);
            assert!(power <= EngineConfig::MAX_POWER);
        }
    }
}
