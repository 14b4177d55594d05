//! Connection-loss watchdog counter.

use crate::config::WatchdogConfig;

/// Result of one watchdog period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogEvent {
    /// Still within the tolerated number of missed periods.
    Alive,
    /// Threshold crossed on this tick; the motor must be cut.
    Tripped,
    /// Threshold was already crossed; keep the motor cut.
    StillTripped,
}

impl WatchdogEvent {
    /// Whether the motor must be held at zero.
    #[inline]
    #[must_use]
    pub const fn cuts_motor(self) -> bool {
        !matches!(self, Self::Alive)
    }
}

/// Counts watchdog periods since the last valid command.
///
/// Once tripped it stays tripped until [`feed`](Self::feed) is called.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkWatchdog {
    missed_ticks: u8,
    tripped: bool,
    max_missed: u8,
}

impl LinkWatchdog {
    #[must_use]
    pub const fn new(config: &WatchdogConfig) -> Self {
        Self {
            missed_ticks: 0,
            tripped: false,
            max_missed: config.max_missed,
        }
    }

    /// A valid command arrived.
    pub fn feed(&mut self) {
        self.missed_ticks = 0;
        self.tripped = false;
    }

    /// One watchdog period elapsed.
    pub fn tick(&mut self) -> WatchdogEvent {
        self.missed_ticks = self.missed_ticks.saturating_add(1);
        if self.missed_ticks <= self.max_missed {
            WatchdogEvent::Alive
        } else if self.tripped {
            WatchdogEvent::StillTripped
        } else {
            self.tripped = true;
            WatchdogEvent::Tripped
        }
    }

    #[inline]
    #[must_use]
    pub const fn missed_ticks(&self) -> u8 {
        self.missed_ticks
    }

    #[inline]
    #[must_use]
    pub const fn is_tripped(&self) -> bool {
        self.tripped
    }
}
