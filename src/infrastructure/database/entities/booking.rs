//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub provider_id: Uuid,
    pub customer_id: Uuid,

    #[sea_orm(nullable)]
    pub service_id: Option<Uuid>,

    pub date: Date,
    pub start_time: Time,
    pub duration_minutes: i32,

    /// Booking status: Pending, Confirmed, InProgress, Completed, Cancelled
    pub status: String,

    /// Amounts in smallest currency unit (e.g., cents)
    pub total_price_cents: i64,
    pub paid_amount_cents: i64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
