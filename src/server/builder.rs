//! Server builder and run_server function
//!
//! `run_server` is the composition root: it connects storage, starts the
//! alert expiry scheduler, serves HTTP and shuts the scheduler down when the
//! server exits.

use crate::config::Config;
use crate::core::alerts::AlertExpiryScheduler;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        config.validate()?;
        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the service until the HTTP server stops
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting SkyAngel alert service");

    let interval = config
        .alerts
        .active_duration()
        .map_err(GatewayError::Config)?;

    let server = ServerBuilder::new().with_config(config).build().await?;

    let scheduler = AlertExpiryScheduler::new(Arc::clone(&server.state().store), interval);
    scheduler.start()?;

    info!(
        "Server starting at: http://{}",
        server.config().address()
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /alerta - Register an alert");
    info!("   GET  /alertas_activas - Active alerts as GeoJSON");
    info!("   POST /alertas/{{id}}/desactivar - Deactivate an alert");
    info!("   GET  /categorias - Incident categories");
    info!("   GET  /route - Routing proxy");
    info!("   GET  /ws - Real-time alert channel");

    let result = server.start().await;
    if let Err(e) = &result {
        warn!("HTTP server exited with error: {}", e);
    }

    scheduler.shutdown().await;
    result
}
