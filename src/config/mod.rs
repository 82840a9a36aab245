use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub currency: CurrencyConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

/// Location of the remote back-office REST API
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout")]
    pub upstream_timeout_seconds: u64,
}

/// Exchange-rate settings for the pricing engine. The default rate is the
/// static fallback used whenever no live source is configured or reachable.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_exchange_rate")]
    pub default_exchange_rate: Decimal,
    #[serde(default)]
    pub rate_endpoint: Option<String>,
    #[serde(default = "default_rate_refresh_seconds")]
    pub rate_refresh_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default = "default_otlp_endpoint_option")]
    pub otlp_endpoint: Option<String>,
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_enable_json_logging")]
    pub enable_json_logging: bool,
}

impl Config {
    pub fn from_environment() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment");

        let server = ServerConfig::from_env()?;
        let upstream = UpstreamConfig::from_env()?;
        let currency = CurrencyConfig::from_env()?;
        let observability = ObservabilityConfig::from_env()?;

        let config = Config {
            server,
            upstream,
            currency,
            observability,
        };

        config.validate()?;

        info!("Configuration loaded successfully");
        debug!("Configuration: {:?}", config);

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        if !self.upstream.api_base_url.starts_with("http") {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "API base URL must be an http(s) URL, got: {}",
                    self.upstream.api_base_url
                ),
            });
        }

        if self.currency.default_exchange_rate <= Decimal::ZERO {
            return Err(ConfigError::ValidationError {
                message: "Default exchange rate must be positive".to_string(),
            });
        }

        if self.currency.rate_refresh_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Rate refresh interval cannot be 0".to_string(),
            });
        }

        Ok(())
    }
}

fn build_env_settings() -> Result<config::Config, ConfigError> {
    config::Config::builder()
        .add_source(config::Environment::with_prefix("BACKOFFICE"))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load configuration: {}", e),
        })
}

impl ServerConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        build_env_settings()?
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize server config: {}", e),
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl UpstreamConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        build_env_settings()?
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize upstream config: {}", e),
            })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}

impl CurrencyConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        build_env_settings()?
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize currency config: {}", e),
            })
    }

    pub fn rate_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.rate_refresh_seconds)
    }
}

impl ObservabilityConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        build_env_settings()?
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize observability config: {}", e),
            })
    }
}

// Default value functions
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    8080
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_max_request_size() -> usize {
    1024 * 1024 // 1MB
}

pub(crate) fn default_api_base_url() -> String {
    "https://tomlin-backend.onrender.com/api".to_string()
}

pub(crate) fn default_exchange_rate() -> Decimal {
    // 1 USD = 56.5 PHP, the static fallback rate
    Decimal::new(565, 1)
}

pub(crate) fn default_rate_refresh_seconds() -> u64 {
    300
}

pub(crate) fn default_service_name() -> String {
    "backoffice-rs".to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_otlp_endpoint_option() -> Option<String> {
    std::env::var("BACKOFFICE_OTLP_ENDPOINT").ok()
}

pub(crate) fn default_enable_json_logging() -> bool {
    std::env::var("BACKOFFICE_ENABLE_JSON_LOGGING")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

pub(crate) fn default_metrics_port() -> u16 {
    9090
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}
