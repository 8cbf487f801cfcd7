//! Configuration management for the Stock Register server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SRS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Remote inventory API configuration
    pub inventory_api: InventoryApiConfig,

    /// Prompt-calling service used for reorder suggestions
    pub reorder_advisor: ReorderAdvisorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryApiConfig {
    /// Base URL of the inventory API (materials, measurements, onboardings, work orders)
    pub base_url: String,

    /// Bearer token sent with every request
    pub api_key: Option<String>,

    /// Records requested per page when walking paginated lists
    pub page_size: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReorderAdvisorConfig {
    /// Prompt endpoint; suggestions are computed locally when unset
    pub endpoint: Option<String>,

    /// API key for the prompt endpoint
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("SRS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("inventory_api.base_url", "http://localhost:8080/api")?
            .set_default("inventory_api.page_size", 100)?
            .set_default("inventory_api.timeout_secs", 30)?
            .set_default("reorder_advisor.timeout_secs", 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SRS_ prefix)
            .add_source(
                Environment::with_prefix("SRS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_files() {
        let config = Config::load().unwrap();
        assert!(!config.inventory_api.base_url.is_empty());
        assert!(config.inventory_api.page_size > 0);
        assert!(config.reorder_advisor.timeout_secs > 0);
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            inventory_api: InventoryApiConfig {
                base_url: "http://localhost".to_string(),
                api_key: None,
                page_size: 50,
                timeout_secs: 5,
            },
            reorder_advisor: ReorderAdvisorConfig {
                endpoint: None,
                api_key: None,
                timeout_secs: 5,
            },
        };
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }
}
