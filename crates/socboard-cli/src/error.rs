//! Error types for the socboard CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use socboard_core::error::CoreError;
use thiserror::Error;

pub use socboard_core::error::{BoardError, ConfigError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const DEVICE_ERROR: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
    pub const VERIFICATION_FAILED: i32 = 5;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No boards found")]
    NoBoardsFound,
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Board(BoardError::Communication { .. }) => exit_codes::NETWORK_ERROR,
                CoreError::Board(BoardError::InvalidResponse { .. }) => exit_codes::DEVICE_ERROR,
                CoreError::Board(BoardError::WriteVerification { .. }) => {
                    exit_codes::VERIFICATION_FAILED
                }
                CoreError::Config(_) => exit_codes::INVALID_ARGS,
                CoreError::Io(_) => exit_codes::GENERAL_ERROR,
            },
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::NoBoardsFound => exit_codes::GENERAL_ERROR,
        }
    }
}

impl From<BoardError> for CliError {
    fn from(e: BoardError) -> Self {
        CliError::Core(CoreError::Board(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}
