//! Alert domain types and their GeoJSON projection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Alert identifier assigned by the store
pub type AlertId = i32;

/// Payload key holding the latitude
pub const LATITUDE_KEY: &str = "latitud_alerta";
/// Payload key holding the longitude
pub const LONGITUDE_KEY: &str = "longitud_alerta";

/// A persisted alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Store-assigned identifier
    pub id: AlertId,
    /// Free-form event data
    pub payload: Value,
    /// Activation timestamp
    pub created_at: DateTime<Utc>,
    /// Whether the alert is still inside its active window
    pub active: bool,
}

/// An alert that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    /// Free-form event data
    pub payload: Value,
    /// Activation timestamp
    pub created_at: DateTime<Utc>,
}

impl NewAlert {
    /// Create an alert activated at `created_at`
    pub fn new(payload: Value, created_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            created_at,
        }
    }

    /// Create an alert activated now
    pub fn now(payload: Value) -> Self {
        Self::new(payload, Utc::now())
    }
}

impl Alert {
    /// Human readable status used by the dashboards
    pub fn status_label(&self) -> &'static str {
        if self.active { "Activa" } else { "Inactiva" }
    }

    /// Whether the active window has elapsed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        self.created_at
            .checked_add_signed(window)
            .is_some_and(|deadline| deadline <= now)
    }

    /// Render the alert as a GeoJSON `Feature`
    pub fn to_feature(&self) -> Feature {
        let mut feature = Feature::from_payload(&self.payload);
        feature
            .properties
            .insert("id_alerta".to_string(), json!(self.id));
        feature
            .properties
            .insert("estatus".to_string(), json!(self.status_label()));
        feature
    }
}

/// GeoJSON point geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[lon, lat]`
    pub coordinates: [f64; 2],
}

impl Geometry {
    /// Point at the given latitude and longitude
    pub fn point(lat: f64, lon: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [lon, lat],
        }
    }
}

/// GeoJSON feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Option<Geometry>,
    pub properties: Map<String, Value>,
}

impl Feature {
    /// Build a feature from an alert payload
    ///
    /// Coordinates are lifted into the geometry; every other key becomes a
    /// property. Non-object payloads are kept under a `payload` property.
    pub fn from_payload(payload: &Value) -> Self {
        let mut properties = Map::new();
        let mut lat = None;
        let mut lon = None;

        match payload {
            Value::Object(fields) => {
                for (key, value) in fields {
                    match key.as_str() {
                        LATITUDE_KEY => lat = coordinate(value),
                        LONGITUDE_KEY => lon = coordinate(value),
                        _ => {
                            properties.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
            other => {
                properties.insert("payload".to_string(), other.clone());
            }
        }

        let geometry = match (lat, lon) {
            (Some(lat), Some(lon)) => Some(Geometry::point(lat, lon)),
            _ => None,
        };

        Self {
            kind: "Feature".to_string(),
            geometry,
            properties,
        }
    }

    /// Serialize into a JSON value
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// GeoJSON feature collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Collect alerts into a feature collection
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features: alerts.iter().map(Alert::to_feature).collect(),
        }
    }
}

/// Incident category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u32,
    pub nombre: &'static str,
}

/// Fixed incident category catalogue
pub const CATEGORIES: [Category; 4] = [
    Category {
        id: 1,
        nombre: "Incidencias delictivas",
    },
    Category {
        id: 2,
        nombre: "Otras incidencias en ruta",
    },
    Category {
        id: 3,
        nombre: "Accidentes",
    },
    Category {
        id: 4,
        nombre: "Recuperaciones",
    },
];
