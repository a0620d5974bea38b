//! Configuration management for paydash
//!
//! This module handles loading, validation, and management of
//! paydash configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Mock data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Number of transactions per generated collection
    #[serde(default = "default_count")]
    pub count: usize,
    /// Currency code stamped on every transaction
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Fixed RNG seed; when set the collection is generated once and reused
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            currency: default_currency(),
            seed: None,
        }
    }
}

fn default_count() -> usize {
    100
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Upper bound on `data.count`
pub const MAX_TRANSACTION_COUNT: usize = 100_000;

/// Dashboard display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Sort applied when a request carries no `sort` parameter
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
        }
    }
}

fn default_sort() -> String {
    "-createdAt".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Mock data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// `dashboard.default_sort` is checked by the server against the sortable
    /// fields, since that list belongs to the core crate.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.data.count == 0 || self.data.count > MAX_TRANSACTION_COUNT {
            return Err(ConfigError::InvalidValue {
                field: "data.count".to_string(),
                reason: format!("Count must be between 1 and {}", MAX_TRANSACTION_COUNT),
            });
        }

        let currency = &self.data.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidValue {
                field: "data.currency".to_string(),
                reason: "Currency must be a three-letter uppercase code".to_string(),
            });
        }

        if self.dashboard.default_sort.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.default_sort".to_string(),
                reason: "Default sort must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================
