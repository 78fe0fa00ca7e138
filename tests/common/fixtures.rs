//! Test fixtures and data factories
//!
//! Provides factory methods for creating alerts with fixed timestamps plus
//! sinks with controlled failure behavior.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Value, json};
use skyangel_alerts::core::alerts::{AlertSink, NewAlert, OutboundMessage};
use skyangel_alerts::{GatewayError, Result};

/// Fixed reference instant plus `hours`
///
/// Whole-hour timestamps keep SQLite text comparisons exact.
pub fn at_hour(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
        .single()
        .expect("valid reference time")
        + Duration::hours(hours)
}

/// Factory for creating test alerts
pub struct AlertFactory;

impl AlertFactory {
    /// The payload used by the channel scenarios
    pub fn robbery_payload() -> Value {
        json!({"tipo": "robo", "lat": 19.4, "lon": -99.1})
    }

    /// Alert created at T = `hours`
    pub fn created_at_hour(hours: i64) -> NewAlert {
        NewAlert::new(Self::robbery_payload(), at_hour(hours))
    }

    /// Enriched payload as produced by the HTTP write path
    pub fn enriched_payload() -> Value {
        json!({
            "tipo_alerta": "Incidencias delictivas",
            "incidencia_alerta": "Robo a transporte",
            "fecha_alerta": "2025-03-01",
            "dia_semana": "Sábado",
            "hora_alerta": "12:00",
            "comentario_alerta": "Sin lesionados",
            "latitud_alerta": 19.4,
            "longitud_alerta": -99.1,
        })
    }

    /// A valid `POST /alerta` body
    pub fn report_body() -> Value {
        json!({
            "tipo": "Incidencias delictivas",
            "incidencia": "Robo a transporte",
            "coordenadas": "19.4, -99.1",
            "comentario": "Sin lesionados",
        })
    }
}

/// Sink whose transport always fails
pub struct FailingSink;

#[async_trait]
impl AlertSink for FailingSink {
    async fn deliver(&self, _message: &OutboundMessage) -> Result<()> {
        Err(GatewayError::channel("connection reset by peer"))
    }
}
