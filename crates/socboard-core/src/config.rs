//! Client configuration.
//!
//! Ports, addresses and timeouts used by register sessions and discovery.
//! Every field has a default, so a config file only needs the values it
//! overrides.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Port boards listen on for register requests and heartbeat enable.
pub const COMMAND_PORT: u16 = 1240;

/// Port boards send heartbeat beacons to.
pub const HEARTBEAT_RESPONSE_PORT: u16 = 1270;

/// Group the heartbeat enable command is sent to.
pub const DEFAULT_GROUP_ADDRESS: &str = "239.255.255.1";

pub const DEFAULT_RECEIVE_TIMEOUT_MS: u64 = 5000;

pub const DEFAULT_DISCOVERY_WINDOW_MS: u64 = 5000;

pub const DEFAULT_MULTICAST_TTL: u32 = 128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Remote port for register requests
    pub command_port: u16,
    /// Local port register sessions bind to (0 picks an ephemeral port)
    pub local_port: u16,
    /// Local port discovery listens on for beacons
    pub response_port: u16,
    /// Multicast group or broadcast address for heartbeat enable
    pub group_address: String,
    /// Per-receive timeout in milliseconds
    pub receive_timeout_ms: u64,
    /// Total discovery listening window in milliseconds
    pub discovery_window_ms: u64,
    /// TTL for the heartbeat enable datagram
    pub multicast_ttl: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            command_port: COMMAND_PORT,
            local_port: COMMAND_PORT,
            response_port: HEARTBEAT_RESPONSE_PORT,
            group_address: DEFAULT_GROUP_ADDRESS.to_string(),
            receive_timeout_ms: DEFAULT_RECEIVE_TIMEOUT_MS,
            discovery_window_ms: DEFAULT_DISCOVERY_WINDOW_MS,
            multicast_ttl: DEFAULT_MULTICAST_TTL,
        }
    }
}

impl ClientConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load `path` if given, otherwise the default location if a file exists there.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.receive_timeout_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "receiveTimeoutMs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.discovery_window_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "discoveryWindowMs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        self.group_ip()?;
        Ok(())
    }

    pub fn group_ip(&self) -> Result<IpAddr, ConfigError> {
        self.group_address
            .parse()
            .map_err(|_| ConfigError::InvalidParameter {
                name: "groupAddress".to_string(),
                message: format!("'{}' is not an IP address", self.group_address),
            })
    }

    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.receive_timeout_ms)
    }

    pub fn discovery_window(&self) -> Duration {
        Duration::from_millis(self.discovery_window_ms)
    }
}

/// Platform config file location, e.g. `~/.config/socboard/config.json` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "socboard", "socboard")
        .map(|dirs| dirs.config_dir().join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_protocol_ports() {
        let config = ClientConfig::default();
        assert_eq!(config.command_port, 1240);
        assert_eq!(config.response_port, 1270);
        assert_eq!(config.group_ip().unwrap().to_string(), "239.255.255.1");
        assert_eq!(config.receive_timeout(), Duration::from_secs(5));
        assert_eq!(config.discovery_window(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"groupAddress": "192.168.1.255", "discoveryWindowMs": 2000}}"#).unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.group_address, "192.168.1.255");
        assert_eq!(config.discovery_window(), Duration::from_secs(2));
        assert_eq!(config.command_port, COMMAND_PORT);
        assert_eq!(config.multicast_ttl, DEFAULT_MULTICAST_TTL);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = ClientConfig::load_or_default(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            ClientConfig::from_json(r#"{"receiveTimeoutMs": 0}"#),
            Err(ConfigError::InvalidParameter { .. })
        ));
        assert!(matches!(
            ClientConfig::from_json(r#"{"groupAddress": "not-an-ip"}"#),
            Err(ConfigError::InvalidParameter { .. })
        ));
        assert!(matches!(
            ClientConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
