//! socboard - command-line interface for SOC board discovery and register access.
//!
//! Thin wrapper over socboard-core: every subcommand maps to one core call
//! whose result is printed as a table or as JSON.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use socboard_core::config::ClientConfig;

use cli::{Cli, Commands, DiscoverArgs};
use error::{exit_codes, CliError};

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr so stdout stays clean for results. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::load_or_default(cli.config.as_deref())?;
    apply_overrides(cli, &mut config);

    config.validate()?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// Command-line flags take precedence over the config file.
fn apply_overrides(cli: &Cli, config: &mut ClientConfig) {
    if let Some(timeout) = cli.timeout {
        config.receive_timeout_ms = timeout;
    }
    if let Some(group) = &cli.group {
        config.group_address = group.clone();
    }
    if let Commands::Discover(DiscoverArgs {
        duration: Some(seconds),
    }) = &cli.command
    {
        config.discovery_window_ms = seconds.saturating_mul(1000);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Discover(_) => commands::run_discover(config, cli.json),
        Commands::Read(args) => commands::run_read(args, &config, cli.json),
        Commands::Write(args) => commands::run_write(args, &config, cli.json),
        Commands::Bitrate(args) => commands::run_bitrate(args, &config, cli.json),
        Commands::Chroma(args) => commands::run_chroma(args, &config, cli.json),
        Commands::Decode(args) => {
            commands::run_decode(args, cli.json);
            Ok(())
        }
    }
}
