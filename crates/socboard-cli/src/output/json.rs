//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::json;

use super::OutputFormatter;
use socboard_core::board::{BoardCapabilities, BoardSummary};
use socboard_core::protocol::RegisterAddress;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_boards(&self, boards: &[BoardSummary]) -> String {
        Self::to_json(&json!({
            "boards": boards,
            "count": boards.len()
        }))
    }

    fn format_capabilities(&self, capabilities: &BoardCapabilities) -> String {
        Self::to_json(capabilities)
    }

    fn format_read(&self, ip: &str, register: RegisterAddress, value: u16) -> String {
        Self::to_json(&json!({
            "ip": ip,
            "space": register.space,
            "address": register.address,
            "value": value,
            "hex": format!("{:04X}", value)
        }))
    }

    fn format_write(
        &self,
        ip: &str,
        register: RegisterAddress,
        value: u16,
        confirmed: Option<u16>,
    ) -> String {
        Self::to_json(&json!({
            "ip": ip,
            "space": register.space,
            "address": register.address,
            "value": value,
            "verified": confirmed.is_some(),
            "confirmed": confirmed
        }))
    }

    fn format_value(&self, ip: &str, name: &str, value: &str) -> String {
        Self::to_json(&json!({
            "ip": ip,
            name: value
        }))
    }
}
