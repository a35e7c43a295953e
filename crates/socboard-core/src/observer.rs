//! Protocol event observers.
//!
//! Sessions and discovery report what they send and receive to an observer
//! passed in at construction. Observers cannot influence control flow.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::error::BoardError;

/// Receives diagnostic events from sessions and discovery.
pub trait ProtocolObserver: Send + Sync {
    /// A datagram is about to be sent.
    fn on_send(&self, _peer: SocketAddr, _message: &str) {}

    /// A datagram was received.
    fn on_receive(&self, _peer: SocketAddr, _message: &str) {}

    /// A heartbeat beacon carrying `word` arrived from `ip`.
    fn on_beacon(&self, _ip: IpAddr, _word: u32) {}

    /// A failure during a discovery scan. Only listener failures end it early.
    fn on_discovery_error(&self, _error: &BoardError) {}
}

/// Shared observer handle.
pub type SharedObserver = Arc<dyn ProtocolObserver>;

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProtocolObserver for NoopObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ProtocolObserver for TracingObserver {
    fn on_send(&self, peer: SocketAddr, message: &str) {
        tracing::debug!(%peer, payload = message, "sending UDP message");
    }

    fn on_receive(&self, peer: SocketAddr, message: &str) {
        tracing::debug!(%peer, payload = message, "received UDP message");
    }

    fn on_beacon(&self, ip: IpAddr, word: u32) {
        tracing::info!(%ip, word, "heartbeat beacon");
    }

    fn on_discovery_error(&self, error: &BoardError) {
        tracing::warn!(%error, "discovery error");
    }
}

pub fn tracing_observer() -> SharedObserver {
    Arc::new(TracingObserver)
}

pub fn noop_observer() -> SharedObserver {
    Arc::new(NoopObserver)
}
