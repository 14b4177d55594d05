//! Ground station entry point.
//!
//! Log filtering follows `RUST_LOG` (default `info`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glider_core::{Controller, Transmitter, DEFAULT_CONTROLLER};
use ground_station::{EventLoop, GilrsJoystick, StationError, UdpCommandLink, AIRCRAFT_ADDR};

/// Which connected gamepad to use.
const JOYSTICK_INDEX: usize = 0;

fn main() -> Result<(), StationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || shutdown.store(true, Ordering::Relaxed))?;
    }

    let link = UdpCommandLink::open(AIRCRAFT_ADDR)?;
    let joystick = GilrsJoystick::open(JOYSTICK_INDEX)?;

    let transmitter = Transmitter::new(joystick, link, Controller::new(DEFAULT_CONTROLLER));
    let mut event_loop = EventLoop::new(transmitter);
    event_loop.run(&shutdown);

    Ok(())
}
