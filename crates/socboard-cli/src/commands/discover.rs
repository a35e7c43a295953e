//! Discover command implementation.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use socboard_core::config::ClientConfig;
use socboard_core::discovery::DiscoveryService;
use socboard_core::observer::tracing_observer;

use crate::error::CliError;
use crate::output::get_formatter;

/// Run the discover command
pub fn run_discover(config: ClientConfig, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let spinner = (!json).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!(
            "Discovering boards on {} for {} seconds...",
            config.group_address,
            config.discovery_window().as_secs()
        ));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let service = DiscoveryService::new(config, tracing_observer());
    let result = service.discover();

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let boards = result?;
    tracing::info!(count = boards.len(), "discovery finished");
    let summaries: Vec<_> = boards.iter().map(|b| b.summary()).collect();

    println!("{}", formatter.format_boards(&summaries));

    if boards.is_empty() {
        return Err(CliError::NoBoardsFound);
    }

    Ok(())
}
