//! Compile-time tunables for both ends of the link.
//!
//! Customize these by building your own const, the same way the defaults
//! below are built.

use crate::trim::TrimState;

/// Controller update rate in ticks per second.
pub const UPDATES_PER_SECOND: u16 = 20;

/// Onboard PWM carrier frequency.
pub const PWM_FREQUENCY_HZ: u32 = 100;

/// Full scale of the duty values carried on the wire (10-bit).
pub const DUTY_FULL_SCALE: u16 = 1024;

/// Joystick axis assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping {
    /// Axis index for pitch (elevator).
    pub pitch: usize,
    /// Axis index for roll (aileron).
    pub roll: usize,
    /// Axis index for throttle.
    pub throttle: usize,
    /// Invert throttle so that stick forward reads positive.
    pub invert_throttle: bool,
}

/// Default axis assignment for a two-stick gamepad.
///
/// - Axis 0 (left stick X) -> Roll
/// - Axis 1 (left stick Y) -> Pitch
/// - Axis 4 (right stick Y) -> Throttle, inverted
pub const DEFAULT_AXES: AxisMapping = AxisMapping {
    pitch: 1,
    roll: 0,
    throttle: 4,
    invert_throttle: true,
};

/// Calibration of one control surface servo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServoCalibration {
    /// Output for a zero delta.
    pub middle: f32,
    /// Output change for a delta of 1.0.
    pub half_range: f32,
    /// Lowest allowed output.
    pub low: f32,
    /// Highest allowed output.
    pub high: f32,
}

impl ServoCalibration {
    /// Full mechanical range shared by all surfaces.
    pub const RANGE: f32 = 254.0;

    #[must_use]
    pub const fn new(middle: f32, low: f32, high: f32) -> Self {
        Self {
            middle,
            half_range: Self::RANGE / 2.0,
            low,
            high,
        }
    }
}

/// Calibration and mixing weights for the three control surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMix {
    /// Right wing.
    pub surface_a: ServoCalibration,
    /// Left wing.
    pub surface_b: ServoCalibration,
    /// Tail.
    pub surface_c: ServoCalibration,
    /// Weight applied to the roll delta on both wings.
    pub roll_scale: f32,
    /// Pitch weight on surface A while pitch is negative.
    pub balance_a_negative: f32,
    /// Pitch weight on surface A otherwise.
    pub balance_a_positive: f32,
    /// Pitch weight on surface B.
    pub balance_b: f32,
}

pub const DEFAULT_SURFACES: SurfaceMix = SurfaceMix {
    surface_a: ServoCalibration::new(132.0, 90.0, 176.0),
    surface_b: ServoCalibration::new(177.0, 92.0, 221.0),
    surface_c: ServoCalibration::new(190.0, 110.0, 254.0),
    roll_scale: 0.4,
    balance_a_negative: 0.5,
    balance_a_positive: 1.0,
    balance_b: 1.0,
};

/// Engine arming gesture and power ramp parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Ticks per second of the calling loop.
    pub tick_rate: u16,
    /// Throttle above which the high range check passes.
    pub high_check: f32,
    /// Throttle below which the low range check passes and the engine arms.
    pub low_check: f32,
    /// Throttle below which an armed engine is killed.
    pub kill: f32,
    /// Throttle deadband above center before power ramps up.
    pub ramp_up_deadband: f32,
    /// Seconds from zero to full power at full stick.
    pub ramp_up_secs: f32,
    /// Seconds from full to zero power at full reverse stick.
    pub ramp_down_secs: f32,
    /// Seconds output stays forced to zero after a kill.
    pub cutoff_secs: u16,
}

impl EngineConfig {
    /// Highest engine power value.
    pub const MAX_POWER: u16 = 1023;

    /// Number of ticks of forced-zero output after a kill.
    #[must_use]
    pub const fn cutoff_ticks(&self) -> u16 {
        self.tick_rate * self.cutoff_secs
    }

    /// Power gained per tick for each unit of throttle past the deadband.
    #[must_use]
    pub fn ramp_up_step(&self) -> f32 {
        1.0 + Self::MAX_POWER as f32 / self.tick_rate as f32 / self.ramp_up_secs
    }

    /// Power lost per tick for each unit of reverse throttle.
    #[must_use]
    pub fn ramp_down_step(&self) -> f32 {
        1.0 + Self::MAX_POWER as f32 / self.tick_rate as f32 / self.ramp_down_secs
    }
}

pub const DEFAULT_ENGINE: EngineConfig = EngineConfig {
    tick_rate: UPDATES_PER_SECOND,
    high_check: 0.9,
    low_check: -0.9,
    kill: -0.98,
    ramp_up_deadband: 0.1,
    ramp_up_secs: 1.0,
    ramp_down_secs: 0.5,
    cutoff_secs: 2,
};

/// Everything the controller needs to turn stick input into commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub axes: AxisMapping,
    /// Pitch sensitivity applied before trim.
    pub pitch_scale: f32,
    pub surfaces: SurfaceMix,
    pub engine: EngineConfig,
    /// Trim in effect at startup.
    pub initial_trim: TrimState,
}

pub const DEFAULT_CONTROLLER: ControllerConfig = ControllerConfig {
    axes: DEFAULT_AXES,
    pitch_scale: 0.3,
    surfaces: DEFAULT_SURFACES,
    engine: DEFAULT_ENGINE,
    initial_trim: TrimState::new(0.2, 0.0),
};

/// Onboard connection-loss watchdog parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchdogConfig {
    /// Watchdog timer period in milliseconds.
    pub period_ms: u64,
    /// Missed periods tolerated before the motor is cut.
    pub max_missed: u8,
}

pub const DEFAULT_WATCHDOG: WatchdogConfig = WatchdogConfig {
    period_ms: 200,
    max_missed: 6,
};
