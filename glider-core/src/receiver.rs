//! Onboard receive loop: datagrams in, duty cycles out.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::pwm::SetDutyCycle;
use glider_proto::{ActuatorCommand, DecodeError};

use crate::input::{DatagramSource, InputError};
use crate::onboard::SharedOnboard;
use crate::output::OutputError;

/// Receive buffer size. Anything longer is truncated and then rejected.
pub const RX_BUFFER_SIZE: usize = 50;

/// Log a status line every this many accepted commands.
pub const STATUS_LOG_INTERVAL: u32 = 20;

/// Receives command datagrams and applies them to the shared outputs.
///
/// Malformed datagrams are logged and dropped; the loop never stops on an
/// error. The receive itself has no timeout, the watchdog acting on
/// [`SharedOnboard`] is the only timeout mechanism.
pub struct Receiver<'a, M: RawMutex, P, S> {
    source: S,
    shared: &'a SharedOnboard<M, P>,
    buf: [u8; RX_BUFFER_SIZE],
    rejected: u32,
}

impl<'a, M: RawMutex, P: SetDutyCycle, S: DatagramSource> Receiver<'a, M, P, S> {
    pub fn new(source: S, shared: &'a SharedOnboard<M, P>) -> Self {
        Self {
            source,
            shared,
            buf: [0; RX_BUFFER_SIZE],
            rejected: 0,
        }
    }

    /// Run the receive loop forever.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_one().await;
        }
    }

    /// Wait for one datagram and apply it.
    ///
    /// Returns the result of the operation for testing purposes.
    pub async fn process_one(&mut self) -> Result<ActuatorCommand, ReceiveError> {
        let len = match self.source.receive(&mut self.buf).await {
            Ok(len) => len.min(RX_BUFFER_SIZE),
            Err(e) => {
                warn!("Receive error: {:?}", e);
                return Err(ReceiveError::Input(e));
            }
        };

        let cmd = match ActuatorCommand::decode(&self.buf[..len]) {
            Ok(cmd) => cmd,
            Err(e) => {
                self.rejected = self.rejected.wrapping_add(1);
                warn!("Ignoring unpack error: {:?}", e);
                return Err(ReceiveError::Decode(e));
            }
        };

        match self.shared.apply_command(&cmd) {
            Ok(accepted) => {
                trace!("Applied command: {:?}", cmd);
                if accepted % STATUS_LOG_INTERVAL == 0 {
                    info!(
                        "{} commands, {} rejected, cur: {:?}",
                        accepted,
                        self.rejected,
                        cmd.duties()
                    );
                }
                Ok(cmd)
            }
            Err(e) => {
                error!("Output error: {:?}", e);
                Err(ReceiveError::Output(e))
            }
        }
    }

    /// Datagrams rejected as malformed since startup (wrapping).
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

/// Error type for receive loop iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiveError {
    /// Error from the datagram source.
    Input(InputError),
    /// Datagram did not decode as a command.
    Decode(DecodeError),
    /// Error writing duty cycles.
    Output(OutputError),
}
