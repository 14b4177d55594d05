//! Platform-agnostic control logic for the glider link.
//!
//! This crate holds everything both ends of the link compute, without any
//! platform-specific dependencies. It can be used both in embedded `no_std`
//! environments and on host for testing.
//!
//! # Overview
//!
//! Controller side:
//!
//! - [`axis`]: Joystick axes to control samples ([`ControlSample`])
//! - [`trim`]: Trim offsets and button roles ([`TrimState`], [`TrimAction`])
//! - [`engine`]: Engine arming gesture and power ramp ([`EngineState`])
//! - [`servo`]: Servo mapping and surface mixing ([`to_servo`])
//! - [`controller`]: Per-tick command generation ([`Controller`])
//! - [`transmitter`]: Joystick to link orchestration ([`Transmitter`])
//!
//! Onboard side:
//!
//! - [`watchdog`]: Connection-loss counter ([`LinkWatchdog`])
//! - [`onboard`]: PWM outputs and watchdog behind one mutex ([`SharedOnboard`])
//! - [`receiver`]: Datagram receive loop ([`Receiver`])
//!
//! Shared:
//!
//! - [`config`]: Compile-time tunables ([`DEFAULT_CONTROLLER`], [`DEFAULT_WATCHDOG`])
//! - [`input`]: Input seams ([`Joystick`], [`DatagramSource`])
//! - [`output`]: Output seams ([`CommandLink`], [`Actuators`])
//!
//! # Example
//!
//! ```rust
//! use glider_core::{Controller, ControlSample};
//!
//! let mut controller = Controller::default();
//! for throttle in [0.95, -0.95, 0.5] {
//!     let cmd = controller.update(&ControlSample::new(0.0, 0.0, throttle));
//!     assert!(cmd.motor <= 1023);
//! }
//! assert!(controller.engine().is_armed());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt (for embedded targets)
//! - **`log`**: Log through the `log` facade (for host binaries)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod axis;
pub mod config;
pub mod controller;
pub mod engine;
pub mod input;
pub mod onboard;
pub mod output;
pub mod receiver;
pub mod servo;
pub mod transmitter;
pub mod trim;
pub mod watchdog;

// Re-export main types at crate root
pub use axis::{ControlSample, TrimmedDeltas};
pub use config::{
    AxisMapping, ControllerConfig, EngineConfig, ServoCalibration, SurfaceMix, WatchdogConfig,
    DEFAULT_CONTROLLER, DEFAULT_WATCHDOG,
};
pub use controller::Controller;
pub use engine::{EngineStage, EngineState};
pub use input::{DatagramSource, InputError, Joystick};
pub use onboard::{OnboardState, SharedOnboard};
pub use output::{Actuators, CommandLink, OutputError};
pub use receiver::{ReceiveError, Receiver};
pub use servo::{to_servo, SurfacePositions};
pub use transmitter::Transmitter;
pub use trim::{ButtonId, TrimAction, TrimState};
pub use watchdog::{LinkWatchdog, WatchdogEvent};

pub use glider_proto::{ActuatorCommand, LINK_PORT};
