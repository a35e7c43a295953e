//! Command builders for the GAPI register protocol.
//!
//! Requests are sent over UDP to boards on port 1240 as
//! `{GAPI <space> 2 <cmd> <addr> <value>}` followed by a NUL terminator.

use std::fmt;

/// Literal that opens every register message.
pub const FRAME_PREFIX: &str = "GAPI";

/// Length field carried by requests.
pub const REQUEST_LENGTH_FIELD: &str = "2";

/// Length field carried by responses.
pub const RESPONSE_LENGTH_FIELD: &str = "1";

/// Terminator byte appended to every outgoing datagram.
pub const TERMINATOR: u8 = 0;

/// Register command letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `R`
    Read,
    /// `W`, no verification
    Write,
    /// `V`, board echoes the value it read back after writing
    VerifiedWrite,
}

impl Command {
    pub fn as_char(self) -> char {
        match self {
            Command::Read => 'R',
            Command::Write => 'W',
            Command::VerifiedWrite => 'V',
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A hardware register: an 8-bit space and an 8-bit offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterAddress {
    pub space: u8,
    pub address: u8,
}

impl RegisterAddress {
    pub const fn new(space: u8, address: u8) -> Self {
        Self { space, address }
    }
}

impl fmt::Display for RegisterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}:{:02X}", self.space, self.address)
    }
}

/// Heartbeat control register.
pub const HEARTBEAT_REGISTER: RegisterAddress = RegisterAddress::new(0x00, 0xB0);

/// Written to [`HEARTBEAT_REGISTER`] to start beaconing.
pub const HEARTBEAT_ENABLE: u16 = 0x1234;

/// Written to [`HEARTBEAT_REGISTER`] to stop beaconing.
pub const HEARTBEAT_DISABLE: u16 = 0x4321;

/// Encoder bitrate register.
pub const BITRATE_REGISTER: RegisterAddress = RegisterAddress::new(0x01, 0x97);

/// Chroma subsampling register.
pub const CHROMA_REGISTER: RegisterAddress = RegisterAddress::new(0x01, 0x03);

/// Encode a register request.
///
/// The value is always zero for reads.
pub fn encode_request(space: u8, command: Command, address: u8, value: u16) -> String {
    let value = match command {
        Command::Read => 0,
        Command::Write | Command::VerifiedWrite => value,
    };
    format!(
        "{{{} {:02X} {} {} {:02X} {:04X}}}",
        FRAME_PREFIX, space, REQUEST_LENGTH_FIELD, command, address, value
    )
}

/// Encode a response the way a board frames it.
pub fn encode_response(space: u8, address: u8, value: u16) -> String {
    format!(
        "{{{} {:02X} {} {:02X} {:04X}}}",
        FRAME_PREFIX, space, RESPONSE_LENGTH_FIELD, address, value
    )
}

/// Append the terminator byte to a message.
pub fn to_datagram(message: &str) -> Vec<u8> {
    let mut datagram = Vec::with_capacity(message.len() + 1);
    datagram.extend_from_slice(message.as_bytes());
    datagram.push(TERMINATOR);
    datagram
}

/// Command builders for the register protocol
pub struct Commands;

impl Commands {
    /// Read a register
    pub fn read(register: RegisterAddress) -> String {
        encode_request(register.space, Command::Read, register.address, 0)
    }

    /// Write a register without read-back
    pub fn write(register: RegisterAddress, value: u16) -> String {
        encode_request(register.space, Command::Write, register.address, value)
    }

    /// Broadcast command that makes boards start beaconing
    pub fn heartbeat_enable() -> String {
        Self::write(HEARTBEAT_REGISTER, HEARTBEAT_ENABLE)
    }

    /// Stop a board from beaconing
    pub fn heartbeat_disable() -> String {
        Self::write(HEARTBEAT_REGISTER, HEARTBEAT_DISABLE)
    }
}
