//! Configuration management for the Tranche Monitor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with TM__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::validate_page_size;

pub const DEFAULT_SUBGRAPH_URL: &str = "https://api.thegraph.com/subgraphs/name/marktoda/tranche";
pub const DEFAULT_CHART_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.min.js";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream subgraph configuration
    pub subgraph: SubgraphConfig,

    /// Landing page configuration
    pub dashboard: DashboardConfig,

    /// Chart rendering configuration
    pub charts: ChartsConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubgraphConfig {
    /// GraphQL endpoint of the tranche subgraph
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Number of tokens in the total supply chart
    pub top_tokens: u32,

    pub demo_bond: String,
    pub demo_account: String,
    pub demo_tranche: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartsConfig {
    /// Chart.js bundle included in every page header
    pub script_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// "pretty" or "json"
    pub format: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("TM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("subgraph.url", DEFAULT_SUBGRAPH_URL)?
            .set_default("subgraph.timeout_secs", 30)?
            .set_default("dashboard.top_tokens", 10)?
            .set_default("dashboard.demo_bond", "0x8B3ea6492d25796346Aa8a2C2e63Da3E9e0EF75A")?
            .set_default("dashboard.demo_account", "0xd6F3804860f1cCa51dAE87A714dDB1A1EC60a619")?
            .set_default("dashboard.demo_tranche", "0xAAA35282144C902d908a8a93dBc1e2bF36A6f5C7")?
            .set_default("charts.script_url", DEFAULT_CHART_SCRIPT_URL)?
            .set_default("logging.format", "pretty")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (TM_ prefix)
            .add_source(
                Environment::with_prefix("TM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every request fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_page_size(self.dashboard.top_tokens)
            .map_err(|e| ConfigError::Message(format!("dashboard.top_tokens: {}", e)))
    }

    /// Configuration pointing at the given subgraph endpoint, defaults elsewhere
    pub fn for_subgraph(url: impl Into<String>) -> Self {
        Self {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            subgraph: SubgraphConfig {
                url: url.into(),
                timeout_secs: 5,
            },
            dashboard: DashboardConfig::default(),
            charts: ChartsConfig {
                script_url: DEFAULT_CHART_SCRIPT_URL.to_string(),
            },
            logging: LoggingConfig {
                format: "pretty".to_string(),
            },
        }
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format.eq_ignore_ascii_case("json")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_tokens: 10,
            demo_bond: "0x8B3ea6492d25796346Aa8a2C2e63Da3E9e0EF75A".to_string(),
            demo_account: "0xd6F3804860f1cCa51dAE87A714dDB1A1EC60a619".to_string(),
            demo_tranche: "0xAAA35282144C902d908a8a93dBc1e2bF36A6f5C7".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_listen_on_5000() {
        let config = Config::load().unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.subgraph.url, DEFAULT_SUBGRAPH_URL);
        assert_eq!(config.dashboard.top_tokens, 10);
    }

    #[test]
    fn test_top_tokens_must_be_a_valid_page_size() {
        let mut config = Config::for_subgraph("http://localhost:1234/graphql");
        assert!(config.validate().is_ok());

        config.dashboard.top_tokens = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dashboard.top_tokens"));

        config.dashboard.top_tokens = 1001;
        assert!(config.validate().is_err());

        config.dashboard.top_tokens = 1000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_for_subgraph() {
        let config = Config::for_subgraph("http://localhost:1234/graphql");
        assert_eq!(config.subgraph.url, "http://localhost:1234/graphql");
        assert!(!config.json_logs());
    }
}
