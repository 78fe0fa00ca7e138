//! HTTP route modules
//!
//! This module contains the alert, websocket and routing-proxy routes.

pub mod alerts;
pub mod routing;
pub mod socket;

use actix_web::web;

/// Register every route of the service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    alerts::configure_routes(cfg);
    socket::configure_routes(cfg);
    routing::configure_routes(cfg);
}
