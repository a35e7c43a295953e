//! Command implementations.

pub mod decode;
pub mod discover;
pub mod register;

pub use decode::run_decode;
pub use discover::run_discover;
pub use register::{run_bitrate, run_chroma, run_read, run_write};
