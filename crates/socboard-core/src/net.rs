//! UDP socket construction.
//!
//! All sockets set SO_REUSEADDR (and SO_REUSEPORT on Unix) so several sessions
//! and a discovery listener can share the protocol's fixed ports.

use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::time::Duration;

/// Largest datagram read from a board.
pub const MAX_DATAGRAM: usize = 1024;

fn unspecified(domain_of: &SocketAddr, port: u16) -> SocketAddr {
    let ip = match domain_of {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    };
    SocketAddr::new(ip, port)
}

fn reusable(domain: Domain) -> io::Result<Socket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

    socket.set_reuse_address(true)?;

    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    Ok(socket)
}

/// Create a blocking UDP socket bound to `port` on all IPv4 interfaces.
pub fn create_reusable_socket(port: u16, read_timeout: Duration) -> io::Result<UdpSocket> {
    let socket = reusable(Domain::IPV4)?;

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
    socket.bind(&addr.into())?;
    socket.set_read_timeout(Some(read_timeout))?;

    Ok(socket.into())
}

/// Create a blocking socket bound to `local_port` and connected to `peer`.
///
/// Connecting restricts replies to the peer's address, which keeps sessions
/// sharing a local port from reading each other's datagrams.
pub fn create_session_socket(
    peer: SocketAddr,
    local_port: u16,
    read_timeout: Duration,
) -> io::Result<UdpSocket> {
    let socket = reusable(Domain::for_address(peer))?;

    socket.set_broadcast(true)?;
    socket.bind(&unspecified(&peer, local_port).into())?;
    socket.set_read_timeout(Some(read_timeout))?;
    socket.connect(&peer.into())?;

    Ok(socket.into())
}

/// Create an unbound-port socket for sending the heartbeat enable to a group.
pub fn create_broadcast_socket(group: IpAddr, ttl: u32) -> io::Result<UdpSocket> {
    let target = SocketAddr::new(group, 0);
    let socket = Socket::new(Domain::for_address(target), Type::DGRAM, Some(Protocol::UDP))?;

    match group {
        IpAddr::V4(_) => {
            socket.set_broadcast(true)?;
            socket.set_multicast_ttl_v4(ttl)?;
        }
        IpAddr::V6(_) => socket.set_multicast_hops_v6(ttl)?,
    }
    socket.bind(&unspecified(&target, 0).into())?;

    Ok(socket.into())
}
