use crate::config::DatabaseConfig;
use crate::utils::error::{GatewayError, Result};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::super::migration::Migrator;
use super::types::{DatabaseBackendType, SeaOrmDatabase};

impl DatabaseBackendType {
    /// Backend addressed by a connection URL
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("sqlite:") {
            Some(Self::SQLite)
        } else if url.starts_with("postgresql://") || url.starts_with("postgres://") {
            Some(Self::PostgreSQL)
        } else {
            None
        }
    }
}

/// File behind a `sqlite://` URL, `None` for in-memory databases
fn sqlite_file(url: &str) -> Option<&Path> {
    let path = url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(Path::new(path))
}

/// Pool options shared by the primary and the fallback connection
fn connect_options(url: &str, config: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_string());
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(config.connection_timeout))
        .acquire_timeout(Duration::from_secs(30))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);
    opt
}

impl SeaOrmDatabase {
    /// Connect to the configured database, falling back to SQLite when
    /// PostgreSQL is unreachable
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let backend_type = DatabaseBackendType::from_url(&config.url).ok_or_else(|| {
            GatewayError::Config(format!("Unsupported database URL: {}", config.url))
        })?;

        match Self::connect(&config.url, config).await {
            Ok(db) => {
                info!("Database connection established ({:?})", backend_type);
                Ok(Self { db, backend_type })
            }
            Err(e) if backend_type == DatabaseBackendType::PostgreSQL => {
                warn!("PostgreSQL connection failed: {}. Using SQLite fallback", e);
                Self::fallback_to_sqlite(config).await
            }
            Err(e) => Err(e),
        }
    }

    async fn connect(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        if let Some(dir) = sqlite_file(url).and_then(Path::parent) {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    GatewayError::Internal(format!(
                        "Failed to create SQLite directory {:?}: {}",
                        dir, e
                    ))
                })?;
            }
        }

        Database::connect(connect_options(url, config))
            .await
            .map_err(GatewayError::Database)
    }

    async fn fallback_to_sqlite(config: &DatabaseConfig) -> Result<Self> {
        info!("Falling back to SQLite database: {}", config.sqlite_fallback);
        let db = Self::connect(&config.sqlite_fallback, config).await?;
        Ok(Self {
            db,
            backend_type: DatabaseBackendType::SQLite,
        })
    }

    /// Get the current backend type
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Check if using SQLite
    pub fn is_sqlite(&self) -> bool {
        self.backend_type == DatabaseBackendType::SQLite
    }

    /// Create or upgrade the alerts schema
    pub async fn migrate(&self) -> Result<()> {
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            GatewayError::Migration(e.to_string())
        })?;
        info!("Alert schema is up to date");
        Ok(())
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the database connection
    pub async fn close(self) -> Result<()> {
        self.db.close().await.map_err(GatewayError::Database)
    }

    /// Ping the database
    pub async fn health_check(&self) -> Result<()> {
        self.db.ping().await.map_err(GatewayError::Database)?;
        debug!("Database ping succeeded");
        Ok(())
    }
}
