//! Error types for SOC board core.

use std::io;

use thiserror::Error;

use crate::protocol::response::ResponseField;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failures of a single register exchange with one board.
///
/// None of these are retried internally; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Socket-level failure or receive timeout.
    #[error("Communication with {ip} failed: {source}")]
    Communication {
        ip: String,
        #[source]
        source: io::Error,
    },

    /// A reply arrived but its framing or echoed fields do not match the request.
    #[error("Invalid response from {ip}: unexpected {field} in {payload:?}")]
    InvalidResponse {
        ip: String,
        field: ResponseField,
        payload: String,
    },

    /// A verified write read back a different value than the one written.
    #[error("Write verification failed on {ip}: wrote {written:04X}, read back {read_back:04X}")]
    WriteVerification {
        ip: String,
        written: u16,
        read_back: u16,
    },
}

impl BoardError {
    pub fn communication(ip: impl Into<String>, source: io::Error) -> Self {
        BoardError::Communication {
            ip: ip.into(),
            source,
        }
    }

    /// True when the exchange failed because no reply arrived in time.
    pub fn is_timeout(&self) -> bool {
        match self {
            BoardError::Communication { source, .. } => is_timeout(source),
            _ => false,
        }
    }

    /// Address of the board the failed exchange targeted.
    pub fn ip(&self) -> &str {
        match self {
            BoardError::Communication { ip, .. }
            | BoardError::InvalidResponse { ip, .. }
            | BoardError::WriteVerification { ip, .. } => ip,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter { name: String, message: String },
}

/// Blocking sockets report an expired read timeout as `WouldBlock` on Unix
/// and `TimedOut` on Windows.
pub(crate) fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
