//! Table-formatted output for CLI.

use chrono::Local;
use colored::*;
use comfy_table::{Cell, ContentArrangement, Table};

use super::OutputFormatter;
use socboard_core::board::{BoardCapabilities, BoardSummary};
use socboard_core::protocol::RegisterAddress;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_boards(&self, boards: &[BoardSummary]) -> String {
        if boards.is_empty() {
            return "No boards found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            "IP", "Board", "Type", "Codec", "Resolution", "FPS", "Channels", "Audio", "Seen",
        ]);

        for board in boards {
            let seen = board
                .discovered_at
                .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
                .unwrap_or_default();

            match &board.info {
                Some(info) => table.add_row(vec![
                    Cell::new(&board.ip),
                    Cell::new(info.board_name),
                    Cell::new(info.board_type),
                    Cell::new(info.codec),
                    Cell::new(info.resolution_class),
                    Cell::new(info.fps_class),
                    Cell::new(info.channel_count),
                    Cell::new(if info.has_audio { "Yes" } else { "No" }),
                    Cell::new(seen),
                ]),
                None => table.add_row(vec![Cell::new(&board.ip)]),
            };
        }

        format!("{}\n\nDiscovered {} SOC board(s)", table, boards.len())
    }

    fn format_capabilities(&self, capabilities: &BoardCapabilities) -> String {
        let mut lines = vec![format!("Capability word: {:#08X}", capabilities.word)];
        for (name, value) in capabilities.attributes() {
            lines.push(format!("  {:<12} {}", format!("{}:", name), value));
        }
        lines.join("\n")
    }

    fn format_read(&self, ip: &str, register: RegisterAddress, value: u16) -> String {
        format!("{} [{}] = {:04X} ({})", ip, register, value, value)
    }

    fn format_write(
        &self,
        ip: &str,
        register: RegisterAddress,
        value: u16,
        confirmed: Option<u16>,
    ) -> String {
        match confirmed {
            Some(read_back) => format!(
                "{} [{}] <- {:04X} {} (read back {:04X})",
                ip,
                register,
                value,
                "verified".green(),
                read_back
            ),
            None => format!("{} [{}] <- {:04X} {}", ip, register, value, "unverified".yellow()),
        }
    }

    fn format_value(&self, ip: &str, name: &str, value: &str) -> String {
        format!("{} {}: {}", ip, name, value)
    }
}
