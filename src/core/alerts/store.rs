//! Alert persistence seam

use crate::storage::database::Database;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use super::types::{Alert, AlertId, NewAlert};

#[cfg(test)]
use mockall::automock;

/// Persistent alert storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Persist a new active alert
    async fn create(&self, alert: NewAlert) -> Result<Alert>;

    /// Fetch an alert by ID
    async fn get(&self, id: AlertId) -> Result<Option<Alert>>;

    /// List alerts that are still active, newest first
    async fn list_active(&self) -> Result<Vec<Alert>>;

    /// Explicitly deactivate one alert
    ///
    /// Returns `false` when the alert does not exist or is already inactive.
    async fn deactivate(&self, id: AlertId) -> Result<bool>;

    /// Deactivate every active alert whose window has elapsed at `now`
    ///
    /// Returns the number of alerts changed by this call.
    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}

/// Database-backed [`AlertStore`]
#[derive(Debug, Clone)]
pub struct AlertRepository {
    db: Arc<Database>,
    active_window: chrono::Duration,
}

impl AlertRepository {
    /// Create a repository whose alerts stay active for `active_window`
    pub fn new(db: Arc<Database>, active_window: chrono::Duration) -> Self {
        Self { db, active_window }
    }

    /// Configured active window
    pub fn active_window(&self) -> chrono::Duration {
        self.active_window
    }

    /// Latest creation time that counts as expired at `now`
    pub fn expiry_cutoff(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        now.checked_sub_signed(self.active_window).ok_or_else(|| {
            GatewayError::internal(format!(
                "Active window of {} is out of range at {}",
                self.active_window, now
            ))
        })
    }
}

#[async_trait]
impl AlertStore for AlertRepository {
    async fn create(&self, alert: NewAlert) -> Result<Alert> {
        let alert = self.db.insert_alert(&alert).await?;
        info!("Alert {} created", alert.id);
        Ok(alert)
    }

    async fn get(&self, id: AlertId) -> Result<Option<Alert>> {
        self.db.find_alert(id).await
    }

    async fn list_active(&self) -> Result<Vec<Alert>> {
        self.db.list_active_alerts().await
    }

    async fn deactivate(&self, id: AlertId) -> Result<bool> {
        let changed = self.db.deactivate_alert(id).await?;
        if changed {
            info!("Alert {} deactivated", id);
        }
        Ok(changed)
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let cutoff = self.expiry_cutoff(now)?;
        let count = self.db.deactivate_alerts_created_before(cutoff).await?;
        debug!("Expired {} alerts created at or before {}", count, cutoff);
        Ok(count)
    }
}
