//! Storage layer for the alert backend
//!
//! This module provides alert persistence on top of SeaORM.

/// Database storage module
pub mod database;

use crate::config::StorageConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Main storage layer that owns the database connection
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<database::Database>,
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        debug!("Connecting to database");
        let database = Arc::new(database::Database::new(&config.database).await?);

        info!("Storage layer initialized successfully");
        Ok(Self { database })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running storage migrations");
        self.database.migrate().await
    }

    /// Health check for the storage backend
    pub async fn health_check(&self) -> Result<()> {
        self.database.health_check().await
    }

    /// Get database connection
    pub fn db(&self) -> Arc<database::Database> {
        Arc::clone(&self.database)
    }
}
