use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealflo_shopping::{AggregationOptions, DEFAULT_DECIMALS, ListOrder};
use serde::Deserialize;
use std::env;

/// Decimal places beyond which rounding stops meaning anything for f64 sums
const MAX_DECIMALS: u32 = 9;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub shopping: ShoppingConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShoppingConfig {
    #[serde(default)]
    pub order: ListOrder,
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            order: ListOrder::default(),
            decimals: default_decimals(),
        }
    }
}

impl ShoppingConfig {
    pub fn options(&self) -> AggregationOptions {
        AggregationOptions {
            order: self.order,
            decimals: self.decimals,
        }
    }
}

fn default_decimals() -> u32 {
    DEFAULT_DECIMALS
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory holding `week-{id}.json` snapshots
    pub weeks_dir: String,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALFLO__SERVER__PORT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("store.weeks_dir", "data/weeks")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALFLO")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.shopping.decimals > MAX_DECIMALS {
            return Err(format!(
                "Shopping decimals must be at most {}",
                MAX_DECIMALS
            ));
        }
        if self.store.weeks_dir.trim().is_empty() {
            return Err("Store weeks_dir must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            observability: ObservabilityConfig::default(),
            shopping: ShoppingConfig::default(),
            store: StoreConfig {
                weeks_dir: "data/weeks".to_string(),
            },
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_too_many_decimals() {
        let mut config = valid_config();
        config.shopping.decimals = 12;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_weeks_dir() {
        let mut config = valid_config();
        config.store.weeks_dir = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shopping_options() {
        let config = ShoppingConfig {
            order: ListOrder::Alphabetical,
            decimals: 1,
        };
        assert_eq!(
            config.options(),
            AggregationOptions {
                order: ListOrder::Alphabetical,
                decimals: 1,
            }
        );
    }
}
