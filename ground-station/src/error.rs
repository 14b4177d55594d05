/// Errors that stop the ground station.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    #[error("No joystick at index {0}")]
    NoJoystick(usize),

    #[error("Joystick backend failed: {0}")]
    Joystick(String),

    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
