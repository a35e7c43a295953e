//! Protocol layer for board communication.
//!
//! This module handles building register requests and validating responses.

pub mod commands;
pub mod response;

pub use commands::{encode_request, Command, Commands, RegisterAddress};
pub use response::{decode_response, DecodeError, ResponseField};
