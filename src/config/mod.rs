//! Configuration management for the alert backend
//!
//! Configuration comes from an optional YAML file, then environment
//! overrides, then validation. A missing or invalid alert duration is fatal.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Alert lifecycle configuration
    #[serde(default)]
    pub alerts: AlertConfig,
    /// Routing proxy configuration
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from YAML text without validating it
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path).await?;
        config.validate()?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    async fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file when it exists, apply environment overrides, validate
    pub async fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let base = match path {
            Some(path) if path.as_ref().exists() => Self::read_file(path).await?,
            Some(path) => {
                info!(
                    "Configuration file {:?} not found, using environment only",
                    path.as_ref()
                );
                Self::default()
            }
            None => Self::default(),
        };

        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid PORT '{}': {}", port, e)))?;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.storage.database.url = url;
        }
        if let Some(hours) = get(ALERT_ACTIVE_DURATION_ENV) {
            let parsed = hours.trim().parse::<f64>().map_err(|e| {
                GatewayError::Config(format!(
                    "Invalid {} '{}': {}",
                    ALERT_ACTIVE_DURATION_ENV, hours, e
                ))
            })?;
            self.alerts.active_duration_hours = Some(parsed);
        }
        if let Some(base_url) = get("ROUTING_BASE_URL") {
            self.routing.base_url = Some(base_url);
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(self)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Get alert configuration
    pub fn alerts(&self) -> &AlertConfig {
        &self.alerts
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.server
            .cors
            .validate()
            .map_err(|e| GatewayError::Config(format!("CORS config error: {}", e)))?;

        self.storage
            .database
            .validate()
            .map_err(|e| GatewayError::Config(format!("Database config error: {}", e)))?;

        self.alerts
            .validate()
            .map_err(|e| GatewayError::Config(format!("Alert config error: {}", e)))?;

        self.routing
            .validate()
            .map_err(|e| GatewayError::Config(format!("Routing config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
