use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use super::database::DatabaseConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::monitor::MonitorConfig;

const DEFAULT_CONFIG_PATH: &str = "blmonitor.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_url: Option<String>,
    pub dns_server: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads `config_path`, or `blmonitor.toml` when present, or defaults.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(url) = overrides.database_url.filter(|u| !u.is_empty()) {
            self.database.url = url;
        }
        if let Some(server) = overrides.dns_server.filter(|s| !s.is_empty()) {
            self.dns.server = Some(server);
        }
        if let Some(level) = overrides.log_level.filter(|l| !l.is_empty()) {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.is_empty() {
            return Err(ConfigError::Validation(
                "database.url cannot be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if let Some(server) = &self.dns.server {
            server.parse::<SocketAddr>().map_err(|e| {
                ConfigError::Validation(format!("dns.server '{}' is not host:port: {}", server, e))
            })?;
        }
        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "dns.query_timeout must be positive".to_string(),
            ));
        }
        if self.monitor.notify_channel.is_empty() {
            return Err(ConfigError::Validation(
                "monitor.notify_channel cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
