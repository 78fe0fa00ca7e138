//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// SQLite URL to fall back to when a PostgreSQL URL cannot be reached
    #[serde(default = "default_sqlite_fallback")]
    pub sqlite_fallback: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/skyangel".to_string(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            sqlite_fallback: default_sqlite_fallback(),
        }
    }
}

impl DatabaseConfig {
    /// In-memory SQLite configuration, single connection
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout: default_connection_timeout(),
            sqlite_fallback: default_sqlite_fallback(),
        }
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL is required".to_string());
        }
        if self.max_connections == 0 {
            return Err("Database max_connections cannot be 0".to_string());
        }
        if !self.sqlite_fallback.starts_with("sqlite:") {
            return Err("Database sqlite_fallback must be a sqlite: URL".to_string());
        }
        Ok(())
    }
}
