//! PWM actuator outputs.
//!
//! Four channels on two PWM slices, all at
//! [`PWM_FREQUENCY_HZ`](glider_core::config::PWM_FREQUENCY_HZ):
//!
//! | Channel   | GPIO | Slice |
//! |-----------|------|-------|
//! | Surface A | 0    | 0 A   |
//! | Surface B | 1    | 0 B   |
//! | Surface C | 2    | 1 A   |
//! | Motor     | 3    | 1 B   |
//!
//! All outputs start at zero duty.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::{PIN_0, PIN_1, PIN_2, PIN_3, PWM_SLICE0, PWM_SLICE1};
use embassy_rp::pwm::{Config, Pwm, PwmOutput};
use embassy_rp::Peri;
use fixed::types::extra::U4;
use fixed::FixedU16;
use glider_core::Actuators;

/// Counter wrap value; full 16-bit resolution.
const TOP: u16 = u16::MAX;

/// Slice configuration for `frequency_hz` at the current system clock.
///
/// `f_pwm = clk_sys / (divider * (TOP + 1))`.
#[must_use]
pub fn slice_config(frequency_hz: u32) -> Config {
    let mut config = Config::default();
    config.top = TOP;
    config.divider = divider_for(clk_sys_freq(), frequency_hz);
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// Clock divider in 8.4 fixed point, saturating at the hardware maximum.
fn divider_for(clk_hz: u32, frequency_hz: u32) -> FixedU16<U4> {
    let counts = u64::from(frequency_hz.max(1)) * (u64::from(TOP) + 1);
    let bits = (u64::from(clk_hz) << 4) / counts;
    FixedU16::from_bits(bits.clamp(1 << 4, 0x0FFF) as u16)
}

/// Set up the four actuator channels.
pub fn init_actuators(
    slice0: Peri<'static, PWM_SLICE0>,
    slice1: Peri<'static, PWM_SLICE1>,
    pin_a: Peri<'static, PIN_0>,
    pin_b: Peri<'static, PIN_1>,
    pin_c: Peri<'static, PIN_2>,
    pin_motor: Peri<'static, PIN_3>,
    frequency_hz: u32,
) -> Option<Actuators<PwmOutput<'static>>> {
    let config = slice_config(frequency_hz);
    defmt::info!(
        "PWM: {} Hz, divider {}, top {}",
        frequency_hz,
        config.divider.to_bits(),
        TOP
    );

    let (a, b) = Pwm::new_output_ab(slice0, pin_a, pin_b, config.clone()).split();
    let (c, motor) = Pwm::new_output_ab(slice1, pin_c, pin_motor, config).split();

    Some(Actuators::new([a?, b?, c?, motor?]))
}
