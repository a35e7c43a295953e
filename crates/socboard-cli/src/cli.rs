//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// socboard - discover SOC boards and access their registers
#[derive(Parser, Debug)]
#[command(name = "socboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Receive timeout in milliseconds
    #[arg(long, global = true, env = "SOCBOARD_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Config file (JSON)
    #[arg(long, global = true, env = "SOCBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Multicast group or broadcast address used for discovery
    #[arg(long, global = true)]
    pub group: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover boards on the network
    Discover(DiscoverArgs),

    /// Read a register
    Read(ReadArgs),

    /// Write a register
    Write(WriteArgs),

    /// Read or set the encoder bitrate
    Bitrate(BitrateArgs),

    /// Read the chroma subsampling mode
    Chroma(ChromaArgs),

    /// Decode a capability word without touching the network
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Discovery duration in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub duration: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Board IP address
    pub ip: String,

    /// Register space (hex)
    #[arg(value_parser = parse_hex_u8)]
    pub space: u8,

    /// Register address (hex)
    #[arg(value_parser = parse_hex_u8)]
    pub address: u8,
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Board IP address
    pub ip: String,

    /// Register space (hex)
    #[arg(value_parser = parse_hex_u8)]
    pub space: u8,

    /// Register address (hex)
    #[arg(value_parser = parse_hex_u8)]
    pub address: u8,

    /// Value (hex)
    #[arg(value_parser = parse_hex_u16)]
    pub value: u16,

    /// Confirm the write by read-back
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args, Debug)]
pub struct BitrateArgs {
    /// Board IP address
    pub ip: String,

    /// New bitrate (hex)
    #[arg(long, value_parser = parse_hex_u16)]
    pub set: Option<u16>,

    /// Confirm the write by read-back
    #[arg(long, requires = "set")]
    pub verify: bool,
}

#[derive(Args, Debug)]
pub struct ChromaArgs {
    /// Board IP address
    pub ip: String,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Capability word (hex)
    #[arg(value_parser = parse_hex_u32)]
    pub word: u32,
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

pub fn parse_hex_u8(s: &str) -> Result<u8, String> {
    u8::from_str_radix(strip_hex_prefix(s), 16).map_err(|e| format!("'{}': {}", s, e))
}

pub fn parse_hex_u16(s: &str) -> Result<u16, String> {
    u16::from_str_radix(strip_hex_prefix(s), 16).map_err(|e| format!("'{}': {}", s, e))
}

pub fn parse_hex_u32(s: &str) -> Result<u32, String> {
    u32::from_str_radix(strip_hex_prefix(s), 16).map_err(|e| format!("'{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex_u8("97"), Ok(0x97));
        assert_eq!(parse_hex_u8("0xB0"), Ok(0xB0));
        assert_eq!(parse_hex_u16("0DAC"), Ok(0x0DAC));
        assert_eq!(parse_hex_u32("0x000021"), Ok(0x21));
        assert!(parse_hex_u8("100").is_err());
        assert!(parse_hex_u16("xyz").is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert!(Cli::try_parse_from(["socboard", "discover", "--duration", "0"]).is_err());
        assert!(Cli::try_parse_from(["socboard", "discover", "--duration", "3"]).is_ok());
    }

    #[test]
    fn test_parse_write_command() {
        let cli = Cli::try_parse_from([
            "socboard", "write", "10.0.0.7", "01", "97", "0AB0", "--verify",
        ])
        .unwrap();
        match cli.command {
            Commands::Write(args) => {
                assert_eq!((args.space, args.address, args.value), (0x01, 0x97, 0x0AB0));
                assert!(args.verify);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
