//! Error types for ffbctl

use forcelink_errors::FfbError;
use forcelink_session::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Force feedback error: {0}")]
    Session(#[from] FfbError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::DeviceNotFound(_) | CliError::Session(FfbError::UnknownDevice(_)) => 2,
            CliError::InvalidConfiguration(_) | CliError::Config(_) => 4,
            CliError::Session(_) => 1,
        }
    }
}
