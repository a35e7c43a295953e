//! Simulated boards on loopback UDP for session and discovery tests.

use std::collections::HashMap;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::protocol::commands::encode_response;
use crate::protocol::response::strip_framing;

/// A parsed request as a board sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub space: u8,
    pub command: char,
    pub address: u8,
    pub value: u16,
}

impl Request {
    pub fn parse(raw: &str) -> Option<Self> {
        let tokens: Vec<&str> = strip_framing(raw).split_whitespace().collect();
        if tokens.len() != 6 || tokens[0] != "GAPI" || tokens[2] != "2" {
            return None;
        }
        Some(Self {
            space: u8::from_str_radix(tokens[1], 16).ok()?,
            command: tokens[3].chars().next()?,
            address: u8::from_str_radix(tokens[4], 16).ok()?,
            value: u16::from_str_radix(tokens[5], 16).ok()?,
        })
    }
}

/// Handler invoked for every datagram the board receives.
pub type Handler = Box<dyn FnMut(&UdpSocket, &str, SocketAddr) + Send>;

pub struct SimulatedBoard {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<String>>>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SimulatedBoard {
    pub fn spawn(handler: Handler) -> Self {
        Self::spawn_at(SocketAddr::from(([127, 0, 0, 1], 0)), handler)
    }

    /// Board listening on an explicit loopback address.
    pub fn spawn_at(addr: SocketAddr, mut handler: Handler) -> Self {
        let socket = UdpSocket::bind(addr).unwrap();
        socket
            .set_read_timeout(Some(Duration::from_millis(20)))
            .unwrap();
        let addr = socket.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let thread = {
            let received = Arc::clone(&received);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut buf = [0u8; 1024];
                while !stop.load(Ordering::SeqCst) {
                    if let Ok((len, src)) = socket.recv_from(&mut buf) {
                        let message = String::from_utf8_lossy(&buf[..len]).to_string();
                        received.lock().unwrap().push(message.clone());
                        handler(&socket, &message, src);
                    }
                }
            })
        };

        Self {
            addr,
            received,
            stop,
            thread: Some(thread),
        }
    }

    /// Board that keeps a register file and answers like real hardware.
    pub fn with_registers(initial: &[((u8, u8), u16)]) -> Self {
        Self::with_registers_at(SocketAddr::from(([127, 0, 0, 1], 0)), initial)
    }

    pub fn with_registers_at(addr: SocketAddr, initial: &[((u8, u8), u16)]) -> Self {
        let mut registers: HashMap<(u8, u8), u16> = initial.iter().copied().collect();
        Self::spawn_at(addr, Box::new(move |socket: &UdpSocket, message: &str, src: SocketAddr| {
            let Some(request) = Request::parse(message) else {
                return;
            };
            let key = (request.space, request.address);
            if request.command != 'R' {
                registers.insert(key, request.value);
            }
            let value = registers.get(&key).copied().unwrap_or(0);
            let reply = encode_response(request.space, request.address, value);
            socket.send_to(reply.as_bytes(), src).unwrap();
        }))
    }

    /// Board that answers every datagram with `reply`.
    pub fn replying(reply: &str) -> Self {
        let reply = reply.to_string();
        Self::spawn(Box::new(move |socket: &UdpSocket, _message: &str, src: SocketAddr| {
            socket.send_to(reply.as_bytes(), src).unwrap();
        }))
    }

    /// Board that never answers.
    pub fn silent() -> Self {
        Self::spawn(Box::new(|_: &UdpSocket, _: &str, _: SocketAddr| {}))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    /// Parsed requests matching `pred`.
    pub fn requests_where(&self, pred: impl Fn(&Request) -> bool) -> Vec<Request> {
        self.received()
            .iter()
            .filter_map(|raw| Request::parse(raw))
            .filter(|request| pred(request))
            .collect()
    }

    /// Config pointing sessions at this board over loopback.
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            command_port: self.addr.port(),
            local_port: 0,
            group_address: "127.0.0.1".to_string(),
            receive_timeout_ms: 300,
            ..ClientConfig::default()
        }
    }
}

impl Drop for SimulatedBoard {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Free UDP port on loopback.
pub fn free_udp_port() -> u16 {
    UdpSocket::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
