use crate::core::alerts::{Alert, NewAlert};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Alert database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    /// Alert ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Free-form event data
    #[sea_orm(column_type = "Json")]
    pub payload: Json,

    /// Activation timestamp
    pub created_at: DateTimeUtc,

    /// Whether the alert is still inside its active window
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert the database row into the domain alert
    pub fn to_domain_alert(&self) -> Alert {
        Alert {
            id: self.id,
            payload: self.payload.clone(),
            created_at: self.created_at,
            active: self.active,
        }
    }
}

impl ActiveModel {
    /// Build an insertable row for a new, active alert
    pub fn from_new_alert(alert: &NewAlert) -> Self {
        Self {
            id: sea_orm::NotSet,
            payload: Set(alert.payload.clone()),
            created_at: Set(alert.created_at),
            active: Set(true),
        }
    }
}
