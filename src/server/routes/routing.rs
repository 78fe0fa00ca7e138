//! Routing proxy in front of a Valhalla-compatible service

use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Number of alternative routes requested upstream
pub const ROUTE_ALTERNATES: u32 = 3;
/// Language of the upstream maneuver instructions
pub const ROUTE_LANGUAGE: &str = "es-ES";

/// Query string of `GET /route`
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// JSON encoded routing request
    pub json: Option<String>,
}

/// Configure routing routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/route", web::get().to(route));
}

/// Parse the request and inject the service defaults
pub fn build_route_request(raw: Option<&str>) -> Result<Value, GatewayError> {
    let raw = raw
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| GatewayError::bad_request("Query parameter 'json' is required"))?;

    let mut request: Value = serde_json::from_str(raw)
        .map_err(|e| GatewayError::bad_request(format!("Invalid routing request: {}", e)))?;

    let fields = request
        .as_object_mut()
        .ok_or_else(|| GatewayError::bad_request("Routing request must be a JSON object"))?;
    fields.insert("alternates".to_string(), json!(ROUTE_ALTERNATES));
    fields.insert("language".to_string(), json!(ROUTE_LANGUAGE));

    Ok(request)
}

/// Readable error text out of an upstream error body
fn upstream_error_message(body: &Value) -> String {
    match body.get("error") {
        Some(Value::String(message)) => message.clone(),
        _ => body.to_string(),
    }
}

/// Forward a routing request upstream
pub async fn route(
    state: web::Data<AppState>,
    query: web::Query<RouteQuery>,
) -> ActixResult<HttpResponse> {
    let base_url = state
        .config
        .routing
        .base_url
        .as_deref()
        .ok_or_else(|| GatewayError::service_unavailable("Routing service is not configured"))?;

    let request = build_route_request(query.json.as_deref())?;
    let url = format!("{}/route", base_url.trim_end_matches('/'));
    debug!("Forwarding routing request to {}", url);

    let response = state
        .http_client
        .get(&url)
        .json(&request)
        .send()
        .await
        .map_err(GatewayError::HttpClient)?;

    let status = response.status();
    let body: Value = response.json().await.map_err(GatewayError::HttpClient)?;

    if !status.is_success() {
        warn!("Routing service answered {}: {}", status, body);
        let error = GatewayError::external(format!(
            "Routing service answered {}: {}",
            status,
            upstream_error_message(&body)
        ));
        return Err(error.into());
    }

    Ok(HttpResponse::Ok().json(body))
}
