//! Configuration module for the server lab dashboard
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SERVERLAB_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use serverlab::config::DashboardConfig;
//!
//! // Load defaults
//! let config = DashboardConfig::default();
//! assert_eq!(config.server.port, 4200);
//!
//! // Parse from TOML
//! let toml = r#"
//! [gateway]
//! api_url = "http://10.0.0.5:8080/api/servers"
//! "#;
//! let config: DashboardConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.gateway.api_url, "http://10.0.0.5:8080/api/servers");
//! ```

pub mod error;
pub mod logging;
pub mod server;

pub use error::ConfigError;
pub use load_test::LoadTestConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

// Section types owned by the modules that consume them
pub use crate::chart::ChartConfig;
pub use crate::gateway::GatewayConfig;
pub use crate::poller::PollerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::controller::ControllerSettings;

/// Unified configuration for the dashboard server.
///
/// ```rust
/// use serverlab::config::DashboardConfig;
///
/// let config = DashboardConfig::default();
/// assert_eq!(config.load_test.port, 8081);
/// assert_eq!(config.chart.window_size, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Backend control API
    pub gateway: GatewayConfig,
    /// Background status refresh
    pub poller: PollerConfig,
    /// Chart window and SVG size
    pub chart: ChartConfig,
    /// Load test form defaults
    pub load_test: LoadTestConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: p.to_path_buf(),
                    source,
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports SERVERLAB_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("SERVERLAB_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("SERVERLAB_HOST") {
            self.server.host = host;
        }
        if let Ok(url) = std::env::var("SERVERLAB_API_URL") {
            self.gateway.api_url = url;
        }

        if let Ok(level) = std::env::var("SERVERLAB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SERVERLAB_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(validation("server.port", "port must be non-zero"));
        }

        let url = self.gateway.api_url.trim();
        if url.is_empty() {
            return Err(validation("gateway.api_url", "URL cannot be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(validation(
                "gateway.api_url",
                "URL must start with http:// or https://",
            ));
        }

        if self.poller.enabled && self.poller.interval_seconds == 0 {
            return Err(validation(
                "poller.interval_seconds",
                "interval must be non-zero when the poller is enabled",
            ));
        }

        if self.chart.window_size == 0 {
            return Err(validation("chart.window_size", "window must hold at least one sample"));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(validation("chart", "width and height must be non-zero"));
        }

        if self.load_test.port == 0 {
            return Err(validation("load_test.port", "port must be non-zero"));
        }
        if self.load_test.number_of_requests == 0 {
            return Err(validation(
                "load_test.number_of_requests",
                "number of requests must be positive",
            ));
        }

        self.logging.validate()
    }

    /// Initial controller form values and window size
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            port: self.load_test.port,
            number_of_requests: self.load_test.number_of_requests,
            window_size: self.chart.window_size,
        }
    }
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_dashboard_config_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.server.port, 4200);
        assert_eq!(config.gateway.api_url, "http://localhost:8080/api/servers");
        assert!(!config.poller.enabled);
        assert_eq!(config.load_test.number_of_requests, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [server]
        port = 9000
        "#;

        let config: DashboardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0"); // Default
    }

    #[test]
    fn test_config_parse_full_toml() {
        let toml = include_str!("../../serverlab.example.toml");
        let config: DashboardConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.chart.window_size, 10);
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[load_test]\nport = 9090\nnumber_of_requests = 5").unwrap();

        let config = DashboardConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.load_test.port, 9090);
        assert_eq!(config.controller_settings().number_of_requests, 5);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = DashboardConfig::load(Some(Path::new("/nonexistent/serverlab.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server\nport = ").unwrap();

        let result = DashboardConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_config_env_override_port() {
        std::env::set_var("SERVERLAB_PORT", "9999");
        let config = DashboardConfig::default().with_env_overrides();
        std::env::remove_var("SERVERLAB_PORT");

        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn test_config_env_override_api_url() {
        std::env::set_var("SERVERLAB_API_URL", "http://lab:8080/api/servers");
        let config = DashboardConfig::default().with_env_overrides();
        std::env::remove_var("SERVERLAB_API_URL");

        assert_eq!(config.gateway.api_url, "http://lab:8080/api/servers");
    }

    #[test]
    fn test_config_env_override_log_format() {
        std::env::set_var("SERVERLAB_LOG_FORMAT", "json");
        let config = DashboardConfig::default().with_env_overrides();
        std::env::remove_var("SERVERLAB_LOG_FORMAT");

        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_bad_api_url() {
        let mut config = DashboardConfig::default();
        config.gateway.api_url = "localhost:8080".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gateway.api_url"));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = DashboardConfig::default();
        config.chart.window_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { field, .. }) if field == "chart.window_size"
        ));
    }

    #[test]
    fn test_validate_poller_interval_only_when_enabled() {
        let mut config = DashboardConfig::default();
        config.poller.interval_seconds = 0;
        assert!(config.validate().is_ok());

        config.poller.enabled = true;
        assert!(config.validate().is_err());
    }
}
