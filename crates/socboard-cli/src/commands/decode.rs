//! Offline capability word decoding.

use socboard_core::board::BoardCapabilities;

use crate::cli::DecodeArgs;
use crate::output::get_formatter;

/// Run the decode command
pub fn run_decode(args: DecodeArgs, json: bool) {
    let formatter = get_formatter(json);
    println!(
        "{}",
        formatter.format_capabilities(&BoardCapabilities::decode(args.word))
    );
}
