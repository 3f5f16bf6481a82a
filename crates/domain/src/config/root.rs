use serde::{Deserialize, Serialize};
use std::path::Path;

use super::dispatch::{DispatchConfig, IdleStrategy, QueueDiscipline};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::workers::WorkerConfig;
use crate::wire::HEADER_LEN;

const LOCAL_CONFIG: &str = "dnsbridge.toml";
const SYSTEM_CONFIG: &str = "/etc/dnsbridge/config.toml";

/// Main configuration structure for dnsbridge
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// UDP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Work queue and dispatch loop behaviour
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Worker threads running native operations
    #[serde(default)]
    pub workers: WorkerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnsbridge.toml in current directory
    /// 3. /etc/dnsbridge/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => Some(path),
            None => Self::get_config_path(),
        };
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(discipline) = overrides.queue_discipline {
            self.dispatch.queue_discipline = discipline;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if !(HEADER_LEN..=65535).contains(&self.server.max_datagram_size) {
            return Err(ConfigError::Validation(format!(
                "max_datagram_size must be between {} and 65535, got {}",
                HEADER_LEN, self.server.max_datagram_size
            )));
        }

        if self.dispatch.idle_strategy == IdleStrategy::Park && self.dispatch.park_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "park_timeout_ms must be positive when idle_strategy is 'park'".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, toml_string).map_err(|e| ConfigError::FileWrite {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// Get the path to the configuration file that `load` would pick up
    pub fn get_config_path() -> Option<&'static str> {
        [LOCAL_CONFIG, SYSTEM_CONFIG]
            .into_iter()
            .find(|candidate| Path::new(candidate).exists())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub queue_discipline: Option<QueueDiscipline>,
}
