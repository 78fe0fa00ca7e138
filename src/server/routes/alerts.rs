//! Alert submission and listing endpoints

use crate::core::alerts::{
    AlertId, AlertReport, CATEGORIES, Feature, FeatureCollection, NewAlert,
};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{Local, Utc};
use serde_json::json;
use tracing::{debug, info};

/// Configure alert routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/alerta", web::post().to(create_alert))
        .route("/alertas_activas", web::get().to(list_active_alerts))
        .route("/alertas/{id}/desactivar", web::post().to(deactivate_alert))
        .route("/categorias", web::get().to(list_categories));
}

/// Validate, enrich, broadcast and persist an alert report
///
/// The body is read as raw bytes so a non-JSON body maps to the service's
/// own error format.
pub async fn create_alert(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let report: AlertReport = serde_json::from_slice(&body)
        .map_err(|e| GatewayError::bad_request(format!("Invalid JSON body: {}", e)))?;

    let validated = report.validate()?;
    let payload = validated.enrich(&Local::now());
    let new_alert = NewAlert::new(payload, Utc::now());

    let feature = Feature::from_payload(&new_alert.payload);
    let report = state.channel.publish(feature.to_value()).await;
    debug!(
        "Alert broadcast to {} subscribers ({} dropped)",
        report.delivered, report.dropped
    );

    let alert = state.store.create(new_alert).await?;
    info!("Alert {} registered", alert.id);

    Ok(HttpResponse::Ok().json(json!({
        "insert": true,
        "id_alerta": alert.id,
    })))
}

/// List active alerts as a GeoJSON FeatureCollection
pub async fn list_active_alerts(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let alerts = state.store.list_active().await?;
    debug!("Listing {} active alerts", alerts.len());
    Ok(HttpResponse::Ok().json(FeatureCollection::from_alerts(&alerts)))
}

/// Explicitly deactivate one alert
pub async fn deactivate_alert(
    state: web::Data<AppState>,
    path: web::Path<AlertId>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    if !state.store.deactivate(id).await? {
        return Err(GatewayError::not_found(format!("Active alert {} not found", id)).into());
    }

    Ok(HttpResponse::Ok().json(json!({
        "update": true,
        "id_alerta": id,
    })))
}

/// Fixed incident category catalogue
pub async fn list_categories() -> HttpResponse {
    HttpResponse::Ok().json(CATEGORIES)
}
