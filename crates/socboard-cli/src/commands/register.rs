//! Register read/write commands.

use std::net::IpAddr;

use socboard_core::board::BoardHandle;
use socboard_core::config::ClientConfig;
use socboard_core::observer::tracing_observer;
use socboard_core::protocol::commands::{BITRATE_REGISTER, RegisterAddress};

use crate::cli::{BitrateArgs, ChromaArgs, ReadArgs, WriteArgs};
use crate::error::CliError;
use crate::output::get_formatter;

fn open_board(ip: &str, config: &ClientConfig) -> Result<BoardHandle, CliError> {
    let ip: IpAddr = ip
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("'{}' is not an IP address", ip)))?;
    Ok(BoardHandle::open(ip, config, tracing_observer())?)
}

/// Run the read command
pub fn run_read(args: ReadArgs, config: &ClientConfig, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let mut board = open_board(&args.ip, config)?;

    let register = RegisterAddress::new(args.space, args.address);
    let value = board.read(register)?;

    println!("{}", formatter.format_read(&args.ip, register, value));
    Ok(())
}

/// Run the write command
pub fn run_write(args: WriteArgs, config: &ClientConfig, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let mut board = open_board(&args.ip, config)?;

    let register = RegisterAddress::new(args.space, args.address);
    let confirmed = board.write(register, args.value, args.verify)?;

    println!(
        "{}",
        formatter.format_write(&args.ip, register, args.value, confirmed)
    );
    Ok(())
}

/// Run the bitrate command
pub fn run_bitrate(args: BitrateArgs, config: &ClientConfig, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let mut board = open_board(&args.ip, config)?;

    match args.set {
        Some(bitrate) => {
            let confirmed = board.set_bitrate(bitrate, args.verify)?;
            println!(
                "{}",
                formatter.format_write(&args.ip, BITRATE_REGISTER, bitrate, confirmed)
            );
        }
        None => {
            let bitrate = board.bitrate()?;
            println!("{}", formatter.format_read(&args.ip, BITRATE_REGISTER, bitrate));
        }
    }

    Ok(())
}

/// Run the chroma command
pub fn run_chroma(args: ChromaArgs, config: &ClientConfig, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let mut board = open_board(&args.ip, config)?;

    let chroma = board.chroma_subsampling()?;
    println!(
        "{}",
        formatter.format_value(&args.ip, "chroma_subsampling", chroma.display_name())
    );
    Ok(())
}
