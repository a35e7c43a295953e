//! Register session: one UDP socket talking to one board.
//!
//! Every operation is a single round trip. A request is sent, then exactly one
//! reply datagram is awaited until the receive timeout expires. Nothing is
//! retried here.

use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::BoardError;
use crate::net::{create_session_socket, MAX_DATAGRAM};
use crate::observer::SharedObserver;
use crate::protocol::commands::{encode_request, to_datagram, Command};
use crate::protocol::response::decode_response;

/// Sockets reject a zero read timeout.
const MIN_RECEIVE_TIMEOUT: Duration = Duration::from_millis(1);

pub struct RegisterSession {
    ip: String,
    peer: SocketAddr,
    socket: UdpSocket,
    observer: SharedObserver,
}

impl RegisterSession {
    /// Open a session to the board at `ip` using the configured ports and timeout.
    pub fn open(
        ip: IpAddr,
        config: &ClientConfig,
        observer: SharedObserver,
    ) -> Result<Self, BoardError> {
        Self::connect(
            SocketAddr::new(ip, config.command_port),
            config.local_port,
            config.receive_timeout(),
            observer,
        )
    }

    /// Open a session to an explicit board address.
    pub fn connect(
        peer: SocketAddr,
        local_port: u16,
        receive_timeout: Duration,
        observer: SharedObserver,
    ) -> Result<Self, BoardError> {
        let ip = peer.ip().to_string();
        let socket = create_session_socket(peer, local_port, receive_timeout)
            .map_err(|e| BoardError::communication(&ip, e))?;

        Ok(Self {
            ip,
            peer,
            socket,
            observer,
        })
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Change how long each operation waits for its reply.
    pub fn set_receive_timeout(&mut self, timeout: Duration) -> Result<(), BoardError> {
        self.socket
            .set_read_timeout(Some(timeout.max(MIN_RECEIVE_TIMEOUT)))
            .map_err(|e| BoardError::communication(&self.ip, e))
    }

    /// Read a register.
    pub fn read_register(&mut self, space: u8, address: u8) -> Result<u16, BoardError> {
        let reply = self.exchange(&encode_request(space, Command::Read, address, 0))?;
        decode_response(&reply, space, address).map_err(|e| e.into_board_error(&self.ip))
    }

    /// Write a register.
    ///
    /// With `verify` the write is confirmed by read-back and the confirmed
    /// value is returned. Without it the board's acknowledgment is consumed
    /// and discarded.
    pub fn write_register(
        &mut self,
        space: u8,
        address: u8,
        value: u16,
        verify: bool,
    ) -> Result<Option<u16>, BoardError> {
        if verify {
            return self
                .verified_write_register(space, address, value)
                .map(Some);
        }

        self.exchange(&encode_request(space, Command::Write, address, value))?;
        Ok(None)
    }

    /// Write a register and check the value the board reads back.
    pub fn verified_write_register(
        &mut self,
        space: u8,
        address: u8,
        value: u16,
    ) -> Result<u16, BoardError> {
        let reply = self.exchange(&encode_request(
            space,
            Command::VerifiedWrite,
            address,
            value,
        ))?;
        let read_back =
            decode_response(&reply, space, address).map_err(|e| e.into_board_error(&self.ip))?;

        if read_back != value {
            return Err(BoardError::WriteVerification {
                ip: self.ip.clone(),
                written: value,
                read_back,
            });
        }

        Ok(read_back)
    }

    fn exchange(&mut self, message: &str) -> Result<String, BoardError> {
        self.send_message(message)?;
        self.receive_message()
    }

    fn send_message(&mut self, message: &str) -> Result<(), BoardError> {
        self.observer.on_send(self.peer, message);
        self.socket
            .send(&to_datagram(message))
            .map_err(|e| BoardError::communication(&self.ip, e))?;
        Ok(())
    }

    fn receive_message(&mut self) -> Result<String, BoardError> {
        let mut buf = [0u8; MAX_DATAGRAM];
        let len = self
            .socket
            .recv(&mut buf)
            .map_err(|e| BoardError::communication(&self.ip, e))?;

        let message = String::from_utf8_lossy(&buf[..len]).into_owned();
        self.observer.on_receive(self.peer, &message);
        Ok(message)
    }
}

impl std::fmt::Debug for RegisterSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterSession")
            .field("peer", &self.peer)
            .field("local", &self.socket.local_addr().ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{noop_observer, ProtocolObserver};
    use crate::protocol::response::ResponseField;
    use crate::testing::SimulatedBoard;
    use std::sync::{Arc, Mutex};

    fn session_for(board: &SimulatedBoard) -> RegisterSession {
        let config = board.config();
        RegisterSession::open(board.addr().ip(), &config, noop_observer()).unwrap()
    }

    #[test]
    fn test_read_register() {
        let board = SimulatedBoard::replying("{GAPI 01 1 97 0ABC}");
        let mut session = session_for(&board);

        assert_eq!(session.read_register(0x01, 0x97).unwrap(), 0x0ABC);
        assert_eq!(board.received(), vec!["{GAPI 01 2 R 97 0000}\0".to_string()]);
    }

    #[test]
    fn test_read_register_wrong_address() {
        let board = SimulatedBoard::replying("{GAPI 01 1 98 0ABC}");
        let mut session = session_for(&board);

        match session.read_register(0x01, 0x97) {
            Err(BoardError::InvalidResponse { field, payload, .. }) => {
                assert_eq!(field, ResponseField::RegisterAddress);
                assert_eq!(payload, "{GAPI 01 1 98 0ABC}");
            }
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_verified_write_confirms_value() {
        let board = SimulatedBoard::with_registers(&[]);
        let mut session = session_for(&board);

        assert_eq!(
            session.verified_write_register(0x01, 0x97, 0x0AB0).unwrap(),
            0x0AB0
        );
        assert_eq!(session.read_register(0x01, 0x97).unwrap(), 0x0AB0);
    }

    #[test]
    fn test_verified_write_detects_mismatch() {
        let board = SimulatedBoard::replying("{GAPI 01 1 97 0AB1}");
        let mut session = session_for(&board);

        match session.verified_write_register(0x01, 0x97, 0x0AB0) {
            Err(BoardError::WriteVerification {
                written, read_back, ..
            }) => {
                assert_eq!(written, 0x0AB0);
                assert_eq!(read_back, 0x0AB1);
            }
            other => panic!("expected WriteVerification, got {:?}", other),
        }
    }

    #[test]
    fn test_write_with_verify_delegates() {
        let board = SimulatedBoard::with_registers(&[]);
        let mut session = session_for(&board);

        assert_eq!(
            session.write_register(0x01, 0x97, 0x0DAC, true).unwrap(),
            Some(0x0DAC)
        );
        assert_eq!(board.requests_where(|r| r.command == 'V').len(), 1);
    }

    #[test]
    fn test_unverified_write_drains_acknowledgment() {
        let board = SimulatedBoard::with_registers(&[((0x01, 0x97), 0x0001)]);
        let mut session = session_for(&board);

        assert_eq!(session.write_register(0x01, 0x97, 0x0DAC, false).unwrap(), None);
        // The ack was consumed, so the next reply read belongs to this read.
        assert_eq!(session.read_register(0x01, 0x97).unwrap(), 0x0DAC);
        assert_eq!(
            board.received()[0],
            "{GAPI 01 2 W 97 0DAC}\0".to_string()
        );
    }

    #[test]
    fn test_timeout_is_communication_error() {
        let board = SimulatedBoard::silent();
        let mut session = session_for(&board);

        let err = session.read_register(0x01, 0x97).unwrap_err();
        assert!(matches!(err, BoardError::Communication { .. }));
        assert!(err.is_timeout());
    }

    #[test]
    fn test_zero_receive_timeout_is_clamped() {
        let board = SimulatedBoard::silent();
        let mut session = session_for(&board);

        session.set_receive_timeout(Duration::ZERO).unwrap();
        let start = std::time::Instant::now();
        let err = session.read_register(0x01, 0x97).unwrap_err();
        assert!(err.is_timeout());
        assert!(start.elapsed() < Duration::from_millis(300));
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl ProtocolObserver for Recorder {
        fn on_send(&self, _peer: SocketAddr, message: &str) {
            self.events.lock().unwrap().push(format!("send {}", message));
        }

        fn on_receive(&self, _peer: SocketAddr, message: &str) {
            self.events.lock().unwrap().push(format!("recv {}", message));
        }
    }

    #[test]
    fn test_observer_sees_both_directions() {
        let board = SimulatedBoard::replying("{GAPI 01 1 97 0ABC}");
        let recorder = Arc::new(Recorder::default());
        let mut session =
            RegisterSession::open(board.addr().ip(), &board.config(), recorder.clone()).unwrap();

        session.read_register(0x01, 0x97).unwrap();
        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec![
                "send {GAPI 01 2 R 97 0000}".to_string(),
                "recv {GAPI 01 1 97 0ABC}".to_string(),
            ]
        );
    }
}
