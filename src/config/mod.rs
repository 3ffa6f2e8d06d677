// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

pub const PROD: &str = "prod";
pub const DEV: &str = "dev";
pub const TEST: &str = "test";

/// Hang duration used by `/hang` and the alternating hang endpoint.
pub const DEFAULT_HANG: Duration = Duration::from_secs(300);
/// Counter increment of `/eachThirdReturns200Others503`.
pub const DEFAULT_ERROR_STEP: u64 = 12;
/// Counter increment of `/eachThirdReturns200OthersHang`.
pub const DEFAULT_HANG_STEP: u64 = 1;
pub const DEFAULT_PORT: u16 = 12345;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid listen host {0:?}: expected an IP address")]
    InvalidHost(String),
    #[error("listen host {0} is not a loopback address")]
    NonLoopbackHost(IpAddr),
}

/// Which request dispatcher the server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Full path-prefix table of simulated faults.
    #[default]
    FailureInjection,
    /// Legacy variant: every request gets 200 headers and a stalled body.
    HangOnly,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(rename = "server", default)]
    pub server: ServerBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerBox {
    pub env: String,
    pub mode: Mode,
    pub logs: Option<Logs>,
    pub api: Api,
    pub hang: Hang,
    pub counter: Counter,
}

impl Default for ServerBox {
    fn default() -> Self {
        Self {
            env: DEV.to_string(),
            mode: Mode::default(),
            logs: None,
            api: Api::default(),
            hang: Hang::default(),
            counter: Counter::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Api {
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            name: "hang-webserver".to_string(),
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Hang {
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl Default for Hang {
    fn default() -> Self {
        Self {
            duration: DEFAULT_HANG,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Counter {
    pub error_step: u64,
    pub hang_step: u64,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            error_step: DEFAULT_ERROR_STEP,
            hang_step: DEFAULT_HANG_STEP,
        }
    }
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    fn mode(&self) -> Mode;
    fn api(&self) -> &Api;
    fn hang(&self) -> &Hang;
    fn counter(&self) -> &Counter;
    fn listen_addr(&self) -> Result<SocketAddr, ConfigError>;
}

// Config type alias for convenience
pub type Config = Settings;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.server.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.server.env == PROD
    }

    fn mode(&self) -> Mode {
        self.server.mode
    }

    fn api(&self) -> &Api {
        &self.server.api
    }

    fn hang(&self) -> &Hang {
        &self.server.hang
    }

    fn counter(&self) -> &Counter {
        &self.server.counter
    }

    /// Resolves the listen address; only loopback hosts are accepted.
    fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self.server.api.host.as_str();
        let ip = if host == "localhost" {
            IpAddr::from([127, 0, 0, 1])
        } else {
            host.parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(host.to_string()))?
        };
        if !ip.is_loopback() {
            return Err(ConfigError::NonLoopbackHost(ip));
        }
        Ok(SocketAddr::new(ip, self.server.api.port))
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::from_yaml(&data).with_context(|| format!("load config from {:?}", abs_path))
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml(data: &str) -> Result<Self> {
        let cfg: Settings = serde_yaml::from_str(data).context("unmarshal config yaml")?;
        cfg.listen_addr()?;
        Ok(cfg)
    }

    /// Overrides the listen port (the CLI positional argument wins over the file).
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.api.port = port;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.server.mode = mode;
        self
    }
}

mod test_config;
pub use test_config::new_test_config;
