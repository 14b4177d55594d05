//! Cooperative controller loop: periodic ticks plus button events.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use glider_core::config::UPDATES_PER_SECOND;
use glider_core::{ButtonId, CommandLink, Joystick, Transmitter};

/// Blocking source of button-down events.
pub trait ButtonEvents {
    /// Wait up to `timeout` for the next button press.
    ///
    /// Implementations keep the axis state current while waiting.
    fn wait_button(&mut self, timeout: Duration) -> Option<ButtonId>;
}

/// What one [`EventLoop::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Tick,
    Button(ButtonId),
    /// Woke up with nothing to do.
    Idle,
}

/// Runs the transmitter at a fixed cadence and handles button presses in
/// between, one event at a time.
pub struct EventLoop<J, L> {
    transmitter: Transmitter<J, L>,
    period: Duration,
    next_tick: Instant,
}

impl<J: Joystick + ButtonEvents, L: CommandLink> EventLoop<J, L> {
    pub fn new(transmitter: Transmitter<J, L>) -> Self {
        Self::with_period(
            transmitter,
            Duration::from_millis(1000 / u64::from(UPDATES_PER_SECOND)),
        )
    }

    pub fn with_period(transmitter: Transmitter<J, L>, period: Duration) -> Self {
        Self {
            transmitter,
            period,
            next_tick: Instant::now(),
        }
    }

    /// Send the hello command, then step until `shutdown` is set.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        if self.transmitter.send_hello().is_err() {
            log::warn!("Hello command not sent");
        }
        while !shutdown.load(Ordering::Relaxed) {
            self.step();
        }
        log::info!("Interrupted");
    }

    /// Wait for the next event and process it.
    pub fn step(&mut self) -> Step {
        let now = Instant::now();
        if now >= self.next_tick {
            // Send errors are already logged; the next tick supersedes them
            let _ = self.transmitter.tick();
            self.next_tick += self.period;
            if self.next_tick < now {
                log::debug!("Tick overran, resynchronizing");
                self.next_tick = now + self.period;
            }
            return Step::Tick;
        }

        let timeout = self.next_tick - now;
        match self.transmitter.joystick_mut().wait_button(timeout) {
            Some(button) => {
                self.transmitter.on_button(button);
                Step::Button(button)
            }
            None => Step::Idle,
        }
    }

    pub fn transmitter(&self) -> &Transmitter<J, L> {
        &self.transmitter
    }

    pub fn into_transmitter(self) -> Transmitter<J, L> {
        self.transmitter
    }
}
