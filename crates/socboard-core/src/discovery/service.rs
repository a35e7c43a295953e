//! Heartbeat-driven board discovery.
//!
//! A scan sends one heartbeat enable to the group address, then listens on
//! the heartbeat response port for a fixed window. Each beaconing board gets
//! a handle, its capability word is decoded, and its heartbeat is switched
//! back off. The window is time-boxed because the number of boards is not
//! known in advance.

use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::{BoardCapabilities, BoardHandle};
use crate::config::ClientConfig;
use crate::error::{is_timeout, BoardError, CoreError};
use crate::net::{create_broadcast_socket, create_reusable_socket, MAX_DATAGRAM};
use crate::observer::SharedObserver;
use crate::protocol::commands::{to_datagram, Commands};

use super::heartbeat::{parse_heartbeat, Beacon};

pub struct DiscoveryService {
    config: ClientConfig,
    observer: SharedObserver,
}

impl DiscoveryService {
    pub fn new(config: ClientConfig, observer: SharedObserver) -> Self {
        Self { config, observer }
    }

    /// Run one scan and return the boards that answered, one per address.
    ///
    /// Failing to set up the sockets is an error. Once listening has started,
    /// only a failure of the listener ends the scan early, returning what was
    /// found so far. Failures tied to one board are reported to the observer.
    pub fn discover(&self) -> Result<Vec<BoardHandle>, CoreError> {
        let group = self.config.group_ip()?;

        // Bound before the enable goes out so no early beacon is missed.
        let receiver =
            create_reusable_socket(self.config.response_port, self.config.receive_timeout())?;
        let sender = create_broadcast_socket(group, self.config.multicast_ttl)?;

        let mut boards = Vec::new();
        if let Err(e) = self.scan(&sender, &receiver, group, &mut boards) {
            self.observer.on_discovery_error(&e);
        }

        Ok(boards)
    }

    fn scan(
        &self,
        sender: &UdpSocket,
        receiver: &UdpSocket,
        group: IpAddr,
        boards: &mut Vec<BoardHandle>,
    ) -> Result<(), BoardError> {
        let target = SocketAddr::new(group, self.config.command_port);
        let enable = Commands::heartbeat_enable();
        self.observer.on_send(target, &enable);
        sender
            .send_to(&to_datagram(&enable), target)
            .map_err(|e| BoardError::communication(group.to_string(), e))?;

        let window = self.config.discovery_window();
        let start = Instant::now();
        let mut buf = [0u8; MAX_DATAGRAM];

        loop {
            let elapsed = start.elapsed();
            if elapsed >= window {
                break;
            }

            // Never wait past the end of the window.
            let wait = (window - elapsed).min(self.config.receive_timeout());
            receiver
                .set_read_timeout(Some(wait))
                .map_err(|e| BoardError::communication(group.to_string(), e))?;

            let (len, addr) = match receiver.recv_from(&mut buf) {
                Ok(received) => received,
                Err(e) if is_timeout(&e) => continue,
                Err(e) => return Err(BoardError::communication(group.to_string(), e)),
            };

            self.observer
                .on_receive(addr, &String::from_utf8_lossy(&buf[..len]));

            if let Some(beacon) = parse_heartbeat(&buf[..len], addr.ip()) {
                self.observer.on_beacon(beacon.ip, beacon.word);
                self.register_board(beacon, boards, window.saturating_sub(start.elapsed()));
            }
        }

        Ok(())
    }

    /// Add a handle for a beaconing board and switch its heartbeat off.
    ///
    /// A board may beacon again before the disable lands; repeats reuse the
    /// existing handle and only resend the disable.
    fn register_board(
        &self,
        beacon: Beacon,
        boards: &mut Vec<BoardHandle>,
        remaining: Duration,
    ) {
        let ip = beacon.ip.to_string();
        let index = match boards.iter().position(|b| b.ip_address() == ip) {
            Some(index) => index,
            None => match BoardHandle::open(beacon.ip, &self.config, Arc::clone(&self.observer)) {
                Ok(mut board) => {
                    board.attach_capabilities(BoardCapabilities::decode(beacon.word));
                    boards.push(board);
                    boards.len() - 1
                }
                Err(e) => {
                    self.observer.on_discovery_error(&e);
                    return;
                }
            },
        };

        if let Err(e) = self.disable_heartbeat(&mut boards[index], remaining) {
            self.observer.on_discovery_error(&e);
        }
    }

    /// Send the heartbeat disable, waiting for its acknowledgment no longer
    /// than the window allows.
    fn disable_heartbeat(
        &self,
        board: &mut BoardHandle,
        remaining: Duration,
    ) -> Result<(), BoardError> {
        let receive_timeout = self.config.receive_timeout();
        board.set_receive_timeout(remaining.min(receive_timeout))?;
        let disabled = board.turn_off_heartbeat();
        board.set_receive_timeout(receive_timeout)?;
        disabled
    }
}
