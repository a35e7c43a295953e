//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use socboard_core::board::{BoardCapabilities, BoardSummary};
use socboard_core::protocol::RegisterAddress;

/// Output formatter trait
pub trait OutputFormatter {
    /// Format discovered boards
    fn format_boards(&self, boards: &[BoardSummary]) -> String;

    /// Format decoded capabilities
    fn format_capabilities(&self, capabilities: &BoardCapabilities) -> String;

    /// Format a register read
    fn format_read(&self, ip: &str, register: RegisterAddress, value: u16) -> String;

    /// Format a register write; `confirmed` is set for verified writes
    fn format_write(
        &self,
        ip: &str,
        register: RegisterAddress,
        value: u16,
        confirmed: Option<u16>,
    ) -> String;

    /// Format a named value read from a board
    fn format_value(&self, ip: &str, name: &str, value: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
