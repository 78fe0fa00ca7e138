//! HTTP route handlers
//!
//! This module provides HTTP route handler functions.

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{debug, warn};

/// Health check endpoint handler
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let (status, database) = match state.storage.health_check().await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            warn!("Database health check failed: {}", e);
            ("degraded", "unreachable")
        }
    };

    let body = json!({
        "status": status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    });

    if status == "healthy" {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
