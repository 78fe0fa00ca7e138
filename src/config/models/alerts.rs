//! Alert lifecycle configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the active window in hours
pub const ALERT_ACTIVE_DURATION_ENV: &str = "ALERT_ACTIVE_DURATION";

/// Alert configuration
///
/// `active_duration_hours` has no default. It is both the lifetime of an
/// alert and the period of the expiry job, and the server refuses to start
/// without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Active window of an alert, in hours
    #[serde(default)]
    pub active_duration_hours: Option<f64>,
    /// Queue length per real-time subscriber
    #[serde(default = "default_subscriber_buffer")]
    pub subscriber_buffer: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            active_duration_hours: None,
            subscriber_buffer: default_subscriber_buffer(),
        }
    }
}

impl AlertConfig {
    /// Active window as a std duration
    pub fn active_duration(&self) -> Result<Duration, String> {
        let hours = self
            .active_duration_hours
            .ok_or_else(|| format!("{} is required", ALERT_ACTIVE_DURATION_ENV))?;

        if !hours.is_finite() || hours <= 0.0 {
            return Err(format!(
                "{} must be a positive number of hours, got {}",
                ALERT_ACTIVE_DURATION_ENV, hours
            ));
        }

        Duration::try_from_secs_f64(hours * 3600.0)
            .map_err(|e| format!("{} is out of range: {}", ALERT_ACTIVE_DURATION_ENV, e))
    }

    /// Active window as a chrono duration, for timestamp arithmetic
    ///
    /// The window must be subtractable from the current time, since the
    /// expiry job computes its cutoff that way on every tick.
    pub fn active_window(&self) -> Result<chrono::Duration, String> {
        let duration = self.active_duration()?;
        let window = chrono::Duration::from_std(duration)
            .map_err(|e| format!("{} is out of range: {}", ALERT_ACTIVE_DURATION_ENV, e))?;

        if chrono::Utc::now().checked_sub_signed(window).is_none() {
            return Err(format!(
                "{} of {} hours reaches past the earliest representable time",
                ALERT_ACTIVE_DURATION_ENV,
                duration.as_secs() / 3600
            ));
        }
        Ok(window)
    }

    /// Validate alert configuration
    pub fn validate(&self) -> Result<(), String> {
        self.active_window()?;
        if self.subscriber_buffer == 0 {
            return Err("Subscriber buffer cannot be 0".to_string());
        }
        Ok(())
    }
}
