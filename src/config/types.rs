//! Core configuration types and loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::defaults::{
    default_nickname, default_port, default_realname, default_timeout_secs, default_true,
    default_username,
};
use super::validation::ValidationError;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("Error converting interval to int: {0}")]
    InvalidInterval(#[source] std::num::ParseIntError),
    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// What to check and where.
    pub check: CheckConfig,
    /// How the probe registers itself.
    #[serde(default)]
    pub client: ClientConfig,
    /// Certificate trust settings.
    #[serde(default)]
    pub tls: TlsConfig,
    /// Run deadline.
    #[serde(default)]
    pub watchdog: WatchdogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Build a config from check parameters, defaulting everything else.
    pub fn new(check: CheckConfig) -> Self {
        Self {
            check,
            client: ClientConfig::default(),
            tls: TlsConfig::default(),
            watchdog: WatchdogConfig::default(),
        }
    }
}

/// Per-run check parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckConfig {
    /// Server name as it appears in the TLS certificate.
    pub server: String,
    /// Host or IP to dial. Defaults to `server`.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Nickname that must be online.
    pub nick: String,
    /// Host that nickname must be connected from (exact match).
    pub expected_hostname: String,
    /// Uptime below this many seconds counts as a reboot.
    #[serde(alias = "interval")]
    pub min_uptime_secs: u64,
}

impl CheckConfig {
    /// The host to dial.
    pub fn dial_address(&self) -> &str {
        self.address.as_deref().unwrap_or(&self.server)
    }
}

/// Identity the probe registers with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_nickname")]
    pub nickname: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_realname")]
    pub realname: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            nickname: default_nickname(),
            username: default_username(),
            realname: default_realname(),
        }
    }
}

/// Trust anchors for the server certificate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TlsConfig {
    /// Extra PEM roots, e.g. a private CA.
    #[serde(default)]
    pub ca_file: Option<PathBuf>,
    /// Trust the platform certificate store.
    #[serde(default = "default_true")]
    pub native_roots: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            ca_file: None,
            native_roots: true,
        }
    }
}

/// Watchdog deadline for the whole run, connect included.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchdogConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl WatchdogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}
