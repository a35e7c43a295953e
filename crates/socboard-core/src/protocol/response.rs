//! Response parsing for the GAPI register protocol.
//!
//! Request and response are correlated purely by position: one request is
//! outstanding per socket, and the reply must echo the space and address that
//! were asked for. Anything else is treated as cross-talk or a stale datagram.

use std::fmt;

use thiserror::Error;

use super::commands::{FRAME_PREFIX, RESPONSE_LENGTH_FIELD};
use crate::error::BoardError;

/// Number of whitespace separated tokens in a response.
const RESPONSE_TOKENS: usize = 5;

/// Hex digits in the value token.
const VALUE_DIGITS: usize = 4;

/// Response field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseField {
    TokenCount,
    Prefix,
    RegisterSpace,
    LengthField,
    RegisterAddress,
    Value,
}

impl ResponseField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseField::TokenCount => "token count",
            ResponseField::Prefix => "prefix",
            ResponseField::RegisterSpace => "register space",
            ResponseField::LengthField => "length field",
            ResponseField::RegisterAddress => "register address",
            ResponseField::Value => "value",
        }
    }
}

impl fmt::Display for ResponseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response that failed validation, before it is attributed to a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected {field} in {payload:?}")]
pub struct DecodeError {
    pub field: ResponseField,
    pub payload: String,
}

impl DecodeError {
    fn new(field: ResponseField, payload: &str) -> Self {
        Self {
            field,
            payload: payload.to_string(),
        }
    }

    /// Attribute the failure to the board at `ip`.
    pub fn into_board_error(self, ip: impl Into<String>) -> BoardError {
        BoardError::InvalidResponse {
            ip: ip.into(),
            field: self.field,
            payload: self.payload,
        }
    }
}

/// Strip braces, the NUL terminator and line endings from a datagram.
pub fn strip_framing(raw: &str) -> &str {
    raw.trim_matches(|c: char| c == '{' || c == '}' || c == '\0' || c.is_whitespace())
}

/// Decode a register response, checking it answers `expected_space`/`expected_address`.
pub fn decode_response(
    raw: &str,
    expected_space: u8,
    expected_address: u8,
) -> Result<u16, DecodeError> {
    let tokens: Vec<&str> = strip_framing(raw).split_whitespace().collect();

    if tokens.len() != RESPONSE_TOKENS {
        return Err(DecodeError::new(ResponseField::TokenCount, raw));
    }
    if tokens[0] != FRAME_PREFIX {
        return Err(DecodeError::new(ResponseField::Prefix, raw));
    }
    if tokens[1] != format!("{:02X}", expected_space) {
        return Err(DecodeError::new(ResponseField::RegisterSpace, raw));
    }
    if tokens[2] != RESPONSE_LENGTH_FIELD {
        return Err(DecodeError::new(ResponseField::LengthField, raw));
    }
    if tokens[3] != format!("{:02X}", expected_address) {
        return Err(DecodeError::new(ResponseField::RegisterAddress, raw));
    }

    parse_value(tokens[4]).ok_or_else(|| DecodeError::new(ResponseField::Value, raw))
}

fn parse_value(token: &str) -> Option<u16> {
    if token.len() != VALUE_DIGITS || !token.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(token, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::commands::{encode_request, encode_response, Command};

    fn field_of(raw: &str) -> ResponseField {
        decode_response(raw, 0x01, 0x97).unwrap_err().field
    }

    #[test]
    fn test_decode_valid_response() {
        assert_eq!(decode_response("{GAPI 01 1 97 0ABC}", 0x01, 0x97), Ok(0x0ABC));
    }

    #[test]
    fn test_decode_tolerates_terminator_and_line_endings() {
        assert_eq!(
            decode_response("{GAPI 01 1 97 0ABC}\0", 0x01, 0x97),
            Ok(0x0ABC)
        );
        assert_eq!(
            decode_response("{GAPI 01 1 97 0ABC}\r\n", 0x01, 0x97),
            Ok(0x0ABC)
        );
    }

    #[test]
    fn test_decode_keeps_every_value_digit() {
        // The last digit is significant, not a trailing marker.
        assert_eq!(decode_response("{GAPI 01 1 97 1235}", 0x01, 0x97), Ok(0x1235));
    }

    #[test]
    fn test_decode_rejects_each_mismatched_field() {
        assert_eq!(field_of("{GAPI 01 1 97}"), ResponseField::TokenCount);
        assert_eq!(field_of("{GAPI 01 1 97 0ABC 00}"), ResponseField::TokenCount);
        assert_eq!(field_of("{GAPX 01 1 97 0ABC}"), ResponseField::Prefix);
        assert_eq!(field_of("{GAPI 02 1 97 0ABC}"), ResponseField::RegisterSpace);
        assert_eq!(field_of("{GAPI 01 2 97 0ABC}"), ResponseField::LengthField);
        assert_eq!(field_of("{GAPI 01 1 98 0ABC}"), ResponseField::RegisterAddress);
        assert_eq!(field_of("{GAPI 01 1 97 0ABG}"), ResponseField::Value);
        assert_eq!(field_of("{GAPI 01 1 97 ABC}"), ResponseField::Value);
    }

    #[test]
    fn test_echoed_request_is_not_a_response() {
        let request = encode_request(0x01, Command::VerifiedWrite, 0x97, 0x0AB0);
        // Six tokens: the command letter is still present.
        assert_eq!(field_of(&request), ResponseField::TokenCount);
    }

    #[test]
    fn test_decode_error_keeps_raw_payload() {
        let err = decode_response("{GAPI 01 1 98 0ABC}", 0x01, 0x97).unwrap_err();
        assert_eq!(err.payload, "{GAPI 01 1 98 0ABC}");
        let board_err = err.into_board_error("10.0.0.7");
        assert_eq!(board_err.ip(), "10.0.0.7");
    }

    #[test]
    fn test_response_framing_recovers_written_value() {
        for (space, address, value) in [(0x00, 0xB0, 0x4321), (0x01, 0x97, 0x0DAC), (0xFF, 0x00, 0xFFFF)] {
            let reply = encode_response(space, address, value);
            assert_eq!(decode_response(&reply, space, address), Ok(value));
        }
    }
}
