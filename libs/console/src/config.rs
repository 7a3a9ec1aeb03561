//! Process configuration loaded from a TOML file.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use subledger_rpc::Endpoint;

/// Top-level console configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub peer: PeerConfig,
    pub network: NetworkConfig,
}

/// Connection settings for the target peer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PeerConfig {
    /// Peer address: `tcp://ip:port` or `unix://path`.
    pub address: String,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            address: "tcp://127.0.0.1:7051".to_string(),
            connect_timeout_secs: 30,
        }
    }
}

/// Known peers, shown by `network list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub peers: Vec<String>,
}

impl GlobalConfig {
    /// Load configuration from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }
}

impl PeerConfig {
    pub fn endpoint(&self) -> Result<Endpoint> {
        Ok(self.address.parse()?)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
