//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::config::Config;
use crate::core::alerts::{AlertChannel, AlertRepository, AlertStore};
use crate::storage::StorageLayer;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use std::time::Duration;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for cheap cloning into every worker.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Alert persistence
    pub store: Arc<dyn AlertStore>,
    /// Real-time fan-out channel
    pub channel: Arc<AlertChannel>,
    /// Client used by the routing proxy
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Create a new AppState on top of a connected storage layer
    pub fn new(config: Config, storage: StorageLayer) -> Result<Self> {
        let window = config.alerts.active_window().map_err(GatewayError::Config)?;
        let store: Arc<dyn AlertStore> = Arc::new(AlertRepository::new(storage.db(), window));
        let channel = Arc::new(AlertChannel::new(config.alerts.subscriber_buffer));

        Self::with_components(config, Arc::new(storage), store, channel)
    }

    /// Create an AppState from already built components
    pub fn with_components(
        config: Config,
        storage: Arc<StorageLayer>,
        store: Arc<dyn AlertStore>,
        channel: Arc<AlertChannel>,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.routing.timeout))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            storage,
            store,
            channel,
            http_client,
        })
    }
}
