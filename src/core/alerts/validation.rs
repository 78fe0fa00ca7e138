//! Validation and enrichment of alert reports submitted over HTTP

use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Datelike, TimeZone, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt::Display;

use super::types::{LATITUDE_KEY, LONGITUDE_KEY};

/// Message returned for unparsable or out-of-range coordinates
pub const INVALID_COORDINATES: &str = "Coordenadas invalidas o fuera de rango";

/// Latitude range accepted for reports, lower bound inclusive, upper exclusive
pub const LATITUDE_RANGE: (f64, f64) = (14.38, 33.0);
/// Longitude range accepted for reports, both bounds inclusive
pub const LONGITUDE_RANGE: (f64, f64) = (-118.44, -86.71);

static COORDINATES_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*$")
        .expect("Invalid coordinates regex")
});

/// Alert submission body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertReport {
    pub tipo: Option<String>,
    pub incidencia: Option<String>,
    pub coordenadas: Option<String>,
    pub comentario: Option<String>,
}

/// Parsed report with every required field present
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedReport {
    pub tipo: String,
    pub incidencia: String,
    pub latitude: f64,
    pub longitude: f64,
    pub comentario: String,
}

impl AlertReport {
    /// Check required fields and coordinates
    pub fn validate(&self) -> Result<ValidatedReport> {
        let tipo = required("tipo", &self.tipo)?;
        let incidencia = required("incidencia", &self.incidencia)?;
        let coordenadas = required("coordenadas", &self.coordenadas)?;
        let comentario = required("comentario", &self.comentario)?;

        let (latitude, longitude) = parse_coordinates(&coordenadas)?;

        Ok(ValidatedReport {
            tipo,
            incidencia,
            latitude,
            longitude,
            comentario,
        })
    }
}

impl ValidatedReport {
    /// Build the stored payload using `at` as the local report time
    pub fn enrich<Tz>(&self, at: &DateTime<Tz>) -> Value
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        json!({
            "tipo_alerta": self.tipo,
            "incidencia_alerta": self.incidencia,
            "fecha_alerta": at.format("%Y-%m-%d").to_string(),
            "dia_semana": spanish_weekday(at.weekday()),
            "hora_alerta": at.format("%H:%M").to_string(),
            "comentario_alerta": self.comentario,
            LATITUDE_KEY: self.latitude,
            LONGITUDE_KEY: self.longitude,
        })
    }
}

fn required(field: &str, value: &Option<String>) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(GatewayError::validation(format!(
            "Field '{}' is required",
            field
        ))),
    }
}

/// Parse `"lat,lon"` and check it against the accepted bounding box
pub fn parse_coordinates(input: &str) -> Result<(f64, f64)> {
    let captures = COORDINATES_PATTERN
        .captures(input)
        .ok_or_else(|| GatewayError::validation(INVALID_COORDINATES))?;

    let lat: f64 = captures[1]
        .parse()
        .map_err(|_| GatewayError::validation(INVALID_COORDINATES))?;
    let lon: f64 = captures[2]
        .parse()
        .map_err(|_| GatewayError::validation(INVALID_COORDINATES))?;

    let lat_ok = (LATITUDE_RANGE.0..LATITUDE_RANGE.1).contains(&lat);
    let lon_ok = (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&lon);
    if !lat_ok || !lon_ok {
        return Err(GatewayError::validation(INVALID_COORDINATES));
    }

    Ok((lat, lon))
}

/// Capitalised Spanish weekday name
pub fn spanish_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}
