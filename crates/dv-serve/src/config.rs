use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::accounts::Account;
use crate::error::{ServeError, ServeResult};

fn default_bind_addr() -> SocketAddr {
    "127.0.0.1:7001".parse().expect("static addr")
}

fn default_fetch_timeout_secs() -> u64 {
    20
}

/// Server configuration, loadable from TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Whether the test-only `/inject` endpoint answers. Off by default.
    #[serde(default)]
    pub enable_inject: bool,
    /// Timeout for upstream client-view fetches, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// The accounts this server syncs for.
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            enable_inject: false,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            accounts: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> ServeResult<Self> {
        toml::from_str(s).map_err(|e| ServeError::Config(e.to_string()))
    }

    /// Load and parse a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ServeResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ServeError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&text)
    }
}
