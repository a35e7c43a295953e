//! UDP board discovery module.
//!
//! Provides heartbeat beacon parsing and the time-boxed discovery service.

pub mod heartbeat;
pub mod service;

pub use heartbeat::{parse_heartbeat, Beacon};
pub use service::DiscoveryService;
