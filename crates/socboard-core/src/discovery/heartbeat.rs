//! Heartbeat beacon parsing.
//!
//! Once heartbeat is enabled a board sends `{BEAT ... <word>}` datagrams to
//! the heartbeat response port. The last token is its capability word in hex.

use std::net::IpAddr;

/// Marker that identifies a beacon datagram.
pub const BEACON_MARKER: &str = "{BEAT";

/// A beacon received from a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beacon {
    pub ip: IpAddr,
    pub word: u32,
}

/// Parse a heartbeat datagram from `ip`.
///
/// Returns `None` for datagrams that are not beacons or whose capability
/// word is not valid hex.
pub fn parse_heartbeat(data: &[u8], ip: IpAddr) -> Option<Beacon> {
    let text = String::from_utf8_lossy(data);
    if !text.contains(BEACON_MARKER) {
        return None;
    }

    let token = text
        .split_whitespace()
        .last()?
        .trim_matches(|c: char| c == '{' || c == '}' || c == '\0');

    let word = u32::from_str_radix(token, 16).ok()?;
    Some(Beacon { ip, word })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const IP: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 40));

    #[test]
    fn test_parse_beacon() {
        let beacon = parse_heartbeat(b"{BEAT 01 000021}", IP).unwrap();
        assert_eq!(beacon.word, 0x21);
        assert_eq!(beacon.ip, IP);
    }

    #[test]
    fn test_parse_beacon_with_line_ending() {
        let beacon = parse_heartbeat(b"{BEAT 1A2B3C4}\r\n", IP).unwrap();
        assert_eq!(beacon.word, 0x01A2_B3C4);
        let beacon = parse_heartbeat(b"{BEAT 00012345}\0", IP).unwrap();
        assert_eq!(beacon.word, 0x12345);
    }

    #[test]
    fn test_ignores_other_datagrams() {
        assert!(parse_heartbeat(b"{GAPI 00 1 B0 4321}", IP).is_none());
        assert!(parse_heartbeat(b"", IP).is_none());
    }

    #[test]
    fn test_ignores_malformed_word() {
        assert!(parse_heartbeat(b"{BEAT}", IP).is_none());
        assert!(parse_heartbeat(b"{BEAT 01 XYZ}", IP).is_none());
        assert!(parse_heartbeat(b"{BEAT 123456789}", IP).is_none());
    }
}
