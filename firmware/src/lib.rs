//! Onboard receiver for the glider link, for the Raspberry Pi Pico W.
//!
//! # Overview
//!
//! The firmware runs on a Pico W (RP2040 + CYW43439) and:
//! 1. Hosts a WPA2 access point with a DHCP server
//! 2. Receives actuator commands as UDP datagrams on port 4242
//! 3. Writes the four command values as PWM duty cycles
//! 4. Cuts the motor when no valid command arrived for too long
//!
//! # Hardware Configuration
//!
//! | Function  | GPIO | Description |
//! |-----------|------|-------------|
//! | Surface A | 0    | Right wing servo |
//! | Surface B | 1    | Left wing servo |
//! | Surface C | 2    | Tail servo |
//! | Motor     | 3    | ESC |
//! | CYW43     | 23, 24, 25, 29 | On-board wireless chip |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime. Besides the wireless driver,
//! network stack and DHCP tasks, two tasks implement the link:
//!
//! - **Receive Task**: Waits for datagrams, decodes them and applies duties
//! - **Watchdog Task**: Ticks every 200 ms and cuts the motor after six silent periods
//!
//! Both go through one [`SharedOnboard`] guarded by a critical-section
//! mutex, so a command's watchdog reset and a tick's increment never
//! interleave. The receive task never times out; a stalled receive cannot
//! hold up the watchdog.
//!
//! # Modules
//!
//! - [`network`]: Access point, network stack and DHCP server
//! - [`pwm_output`]: PWM channel setup ([`init_actuators`])
//! - [`udp_input`]: UDP datagram source ([`UdpInputSource`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`strict-bind`**: Treat a failed bind of the command port as fatal instead
//!   of running on with the motor held off

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they define conflicting panic handlers");

// Re-export core types for convenience
pub use glider_core::{
    config, ActuatorCommand, Actuators, DatagramSource, InputError, OnboardState, OutputError,
    ReceiveError, Receiver, SharedOnboard, WatchdogConfig, WatchdogEvent, DEFAULT_WATCHDOG,
    LINK_PORT,
};

pub mod network;
pub mod pwm_output;
pub mod udp_input;

pub use network::{start_access_point, WifiPeripherals};
pub use pwm_output::init_actuators;
pub use udp_input::UdpInputSource;

/// What to do when the command port cannot be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum BindPolicy {
    /// Panic.
    Fatal,
    /// Log and keep running without a listener. The watchdog keeps the
    /// motor cut.
    Degrade,
}

/// Bind policy selected by the `strict-bind` feature.
pub const BIND_POLICY: BindPolicy = if cfg!(feature = "strict-bind") {
    BindPolicy::Fatal
} else {
    BindPolicy::Degrade
};
