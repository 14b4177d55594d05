//! Onboard actuator state shared between the receive loop and the watchdog.
//!
//! The receive loop and the watchdog timer run as independent activities.
//! Both go through [`SharedOnboard`], which keeps the watchdog counter and the
//! PWM channels behind a single blocking mutex: a command's counter reset and
//! duty writes happen in one critical section, and so does a watchdog tick's
//! increment and motor cut.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::pwm::SetDutyCycle;
use glider_proto::ActuatorCommand;

use crate::config::WatchdogConfig;
use crate::output::{Actuators, OutputError};
use crate::watchdog::{LinkWatchdog, WatchdogEvent};

/// PWM outputs plus the connection-loss watchdog.
pub struct OnboardState<P> {
    actuators: Actuators<P>,
    watchdog: LinkWatchdog,
    accepted: u32,
}

impl<P: SetDutyCycle> OnboardState<P> {
    pub fn new(actuators: Actuators<P>, config: &WatchdogConfig) -> Self {
        Self {
            actuators,
            watchdog: LinkWatchdog::new(config),
            accepted: 0,
        }
    }

    /// Apply a freshly decoded command.
    ///
    /// Feeds the watchdog and writes all four duties, re-enabling the motor
    /// if the watchdog had cut it. Returns the number of commands accepted so
    /// far.
    pub fn apply_command(&mut self, cmd: &ActuatorCommand) -> Result<u32, OutputError> {
        if self.watchdog.is_tripped() {
            info!("Connection restored");
        }
        self.watchdog.feed();
        self.accepted = self.accepted.wrapping_add(1);
        self.actuators.apply(cmd)?;
        Ok(self.accepted)
    }

    /// Advance the watchdog by one period, cutting the motor once silent for
    /// too long.
    pub fn watchdog_tick(&mut self) -> WatchdogEvent {
        let event = self.watchdog.tick();
        if event == WatchdogEvent::Tripped {
            warn!("Lost connection! Disabling engine!");
        }
        if event.cuts_motor() {
            if let Err(e) = self.actuators.cut_motor() {
                error!("Motor cutoff failed: {:?}", e);
            }
        }
        event
    }

    pub fn actuators(&self) -> &Actuators<P> {
        &self.actuators
    }

    pub fn watchdog(&self) -> &LinkWatchdog {
        &self.watchdog
    }

    /// Commands accepted since startup (wrapping).
    pub fn accepted(&self) -> u32 {
        self.accepted
    }
}

/// [`OnboardState`] behind a blocking mutex, safe to share between tasks.
pub struct SharedOnboard<M: RawMutex, P> {
    inner: Mutex<M, RefCell<OnboardState<P>>>,
}

impl<M: RawMutex, P: SetDutyCycle> SharedOnboard<M, P> {
    pub const fn new(state: OnboardState<P>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(state)),
        }
    }

    /// See [`OnboardState::apply_command`].
    pub fn apply_command(&self, cmd: &ActuatorCommand) -> Result<u32, OutputError> {
        self.inner.lock(|state| state.borrow_mut().apply_command(cmd))
    }

    /// See [`OnboardState::watchdog_tick`].
    pub fn watchdog_tick(&self) -> WatchdogEvent {
        self.inner.lock(|state| state.borrow_mut().watchdog_tick())
    }

    /// Run `f` with exclusive access to the state.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut OnboardState<P>) -> R) -> R {
        self.inner.lock(|state| f(&mut state.borrow_mut()))
    }
}
