//! Provider schedule entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub provider_id: Uuid,

    /// Day of week: 0 = Monday … 6 = Sunday
    pub day_of_week: i16,

    pub is_working_day: bool,

    pub work_start: Time,
    pub work_end: Time,

    #[sea_orm(nullable)]
    pub break_start: Option<Time>,

    #[sea_orm(nullable)]
    pub break_end: Option<Time>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
