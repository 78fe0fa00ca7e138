use crate::core::alerts::{Alert, AlertId, NewAlert};
use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, alert};
use super::types::{DatabaseStats, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Insert a new active alert
    pub async fn insert_alert(&self, new_alert: &NewAlert) -> Result<Alert> {
        debug!("Inserting alert created at {}", new_alert.created_at);

        let model = alert::ActiveModel::from_new_alert(new_alert)
            .insert(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(model.to_domain_alert())
    }

    /// Find alert by ID
    pub async fn find_alert(&self, id: AlertId) -> Result<Option<Alert>> {
        debug!("Finding alert by ID: {}", id);

        let model = entities::Alert::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(model.map(|m| m.to_domain_alert()))
    }

    /// List active alerts, newest first
    pub async fn list_active_alerts(&self) -> Result<Vec<Alert>> {
        let models = entities::Alert::find()
            .filter(alert::Column::Active.eq(true))
            .order_by_desc(alert::Column::CreatedAt)
            .order_by_desc(alert::Column::Id)
            .all(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(models.iter().map(|m| m.to_domain_alert()).collect())
    }

    /// Deactivate one alert; returns false when it is missing or already inactive
    pub async fn deactivate_alert(&self, id: AlertId) -> Result<bool> {
        debug!("Deactivating alert: {}", id);

        let result = entities::Alert::update_many()
            .col_expr(alert::Column::Active, Expr::value(false))
            .filter(alert::Column::Id.eq(id))
            .filter(alert::Column::Active.eq(true))
            .exec(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(result.rows_affected == 1)
    }

    /// Deactivate every active alert created at or before `cutoff`
    ///
    /// Runs as one UPDATE statement. Rows already inactive are not counted,
    /// so a repeated call with the same cutoff returns zero.
    pub async fn deactivate_alerts_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        debug!("Deactivating alerts created at or before {}", cutoff);

        let result = entities::Alert::update_many()
            .col_expr(alert::Column::Active, Expr::value(false))
            .filter(alert::Column::Active.eq(true))
            .filter(alert::Column::CreatedAt.lte(cutoff))
            .exec(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(result.rows_affected)
    }

    /// Get database statistics
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let total_alerts = entities::Alert::find()
            .count(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        let active_alerts = entities::Alert::find()
            .filter(alert::Column::Active.eq(true))
            .count(&self.db)
            .await
            .map_err(GatewayError::Database)?;

        Ok(DatabaseStats {
            backend: self.backend_type,
            total_alerts,
            active_alerts,
        })
    }
}
