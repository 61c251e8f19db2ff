//! Slot reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "slot_reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub provider_id: Uuid,
    pub customer_id: Uuid,

    pub date: Date,
    pub start_time: Time,
    pub duration_minutes: i32,

    /// Hold TTL; past this instant the row no longer blocks anything
    pub reserved_until: DateTimeUtc,

    /// Reservation status: Reserved, Released, Expired
    pub status: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
