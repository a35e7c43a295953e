//! Core library for SOC video encoder/decoder boards.
//!
//! Boards speak a text-framed register protocol over UDP:
//!
//! - request: `{GAPI SS 2 C AA VVVV}` with `C` one of `R`, `W`, `V`
//! - response: `{GAPI SS 1 AA VVVV}`
//! - beacon: `{BEAT ... <capability word>}`
//!
//! [`discovery::DiscoveryService`] finds boards on the local segment and
//! returns a [`board::BoardHandle`] per board. A handle can also be opened
//! directly when the address is known:
//!
//! ```no_run
//! use socboard_core::board::BoardHandle;
//! use socboard_core::config::ClientConfig;
//! use socboard_core::observer::tracing_observer;
//!
//! let config = ClientConfig::default();
//! let mut board = BoardHandle::open("192.168.1.40".parse()?, &config, tracing_observer())?;
//! let bitrate = board.read_register(0x01, 0x97)?;
//! board.write_register(0x01, 0x97, bitrate + 1, true)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! All I/O is blocking. A session allows one outstanding request at a time.

pub mod board;
pub mod config;
pub mod discovery;
pub mod error;
pub mod net;
pub mod observer;
pub mod protocol;

#[cfg(test)]
pub(crate) mod testing;

pub use board::{BoardCapabilities, BoardHandle, RegisterSession};
pub use config::ClientConfig;
pub use discovery::DiscoveryService;
pub use error::{BoardError, ConfigError, CoreError, Result};
