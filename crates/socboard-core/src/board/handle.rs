//! Board handles.

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::capabilities::BoardCapabilities;
use super::session::RegisterSession;
use crate::config::ClientConfig;
use crate::error::BoardError;
use crate::observer::SharedObserver;
use crate::protocol::commands::{
    RegisterAddress, BITRATE_REGISTER, CHROMA_REGISTER, HEARTBEAT_DISABLE, HEARTBEAT_ENABLE,
    HEARTBEAT_REGISTER,
};

/// Chroma subsampling reported by a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChromaSubsampling {
    #[serde(rename = "4:2:0")]
    Yuv420,
    #[serde(rename = "4:2:2")]
    Yuv422,
    Unknown,
}

impl ChromaSubsampling {
    pub fn from_register(value: u16) -> Self {
        match value {
            1 => ChromaSubsampling::Yuv420,
            2 => ChromaSubsampling::Yuv422,
            _ => ChromaSubsampling::Unknown,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ChromaSubsampling::Yuv420 => "4:2:0",
            ChromaSubsampling::Yuv422 => "4:2:2",
            ChromaSubsampling::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ChromaSubsampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A board reachable for register access.
///
/// Each handle owns its session socket; dropping the handle releases it.
#[derive(Debug)]
pub struct BoardHandle {
    ip_address: String,
    session: RegisterSession,
    capabilities: Option<BoardCapabilities>,
    discovered_at: Option<DateTime<Utc>>,
}

/// Serializable view of a handle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<BoardCapabilities>,
}

impl BoardHandle {
    /// Open a handle to a board whose address is already known.
    pub fn open(
        ip: IpAddr,
        config: &ClientConfig,
        observer: SharedObserver,
    ) -> Result<Self, BoardError> {
        Ok(Self::from_session(RegisterSession::open(ip, config, observer)?))
    }

    pub fn from_session(session: RegisterSession) -> Self {
        Self {
            ip_address: session.ip().to_string(),
            session,
            capabilities: None,
            discovered_at: None,
        }
    }

    /// Attach capabilities learned from a beacon.
    pub(crate) fn attach_capabilities(&mut self, capabilities: BoardCapabilities) {
        self.capabilities = Some(capabilities);
        self.discovered_at = Some(Utc::now());
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    /// Capabilities, present for handles returned by discovery.
    pub fn board_info(&self) -> Option<&BoardCapabilities> {
        self.capabilities.as_ref()
    }

    pub fn discovered_at(&self) -> Option<DateTime<Utc>> {
        self.discovered_at
    }

    /// Change how long register operations wait for a reply.
    pub fn set_receive_timeout(&mut self, timeout: Duration) -> Result<(), BoardError> {
        self.session.set_receive_timeout(timeout)
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            ip: self.ip_address.clone(),
            discovered_at: self.discovered_at,
            info: self.capabilities,
        }
    }

    pub fn read_register(&mut self, space: u8, address: u8) -> Result<u16, BoardError> {
        self.session.read_register(space, address)
    }

    pub fn write_register(
        &mut self,
        space: u8,
        address: u8,
        value: u16,
        verify: bool,
    ) -> Result<Option<u16>, BoardError> {
        self.session.write_register(space, address, value, verify)
    }

    pub fn verified_write_register(
        &mut self,
        space: u8,
        address: u8,
        value: u16,
    ) -> Result<u16, BoardError> {
        self.session.verified_write_register(space, address, value)
    }

    pub fn read(&mut self, register: RegisterAddress) -> Result<u16, BoardError> {
        self.read_register(register.space, register.address)
    }

    pub fn write(
        &mut self,
        register: RegisterAddress,
        value: u16,
        verify: bool,
    ) -> Result<Option<u16>, BoardError> {
        self.write_register(register.space, register.address, value, verify)
    }

    pub fn turn_on_heartbeat(&mut self) -> Result<(), BoardError> {
        self.write(HEARTBEAT_REGISTER, HEARTBEAT_ENABLE, true)
            .map(|_| ())
    }

    pub fn turn_off_heartbeat(&mut self) -> Result<(), BoardError> {
        self.write(HEARTBEAT_REGISTER, HEARTBEAT_DISABLE, false)
            .map(|_| ())
    }

    pub fn bitrate(&mut self) -> Result<u16, BoardError> {
        self.read(BITRATE_REGISTER)
    }

    pub fn set_bitrate(&mut self, bitrate: u16, verify: bool) -> Result<Option<u16>, BoardError> {
        self.write(BITRATE_REGISTER, bitrate, verify)
    }

    pub fn chroma_subsampling(&mut self) -> Result<ChromaSubsampling, BoardError> {
        self.read(CHROMA_REGISTER)
            .map(ChromaSubsampling::from_register)
    }
}

impl fmt::Display for BoardHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.capabilities {
            Some(caps) => write!(
                f,
                "SOCBoard({}) - {} ({})",
                self.ip_address, caps.board_name, caps.board_type
            ),
            None => write!(f, "SOCBoard({})", self.ip_address),
        }
    }
}
