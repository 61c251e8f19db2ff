//! SeaORM implementation of ProviderScheduleRepository

use async_trait::async_trait;
use chrono::Weekday;
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::db_err;
use crate::domain::schedule::{
    DaySchedule, ProviderScheduleRepository, WeeklySchedule, WorkingHours,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::provider_schedule;

pub struct SeaOrmProviderScheduleRepository {
    db: DatabaseConnection,
}

impl SeaOrmProviderScheduleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn weekday_from_index(index: i16) -> DomainResult<Weekday> {
    match index {
        0 => Ok(Weekday::Mon),
        1 => Ok(Weekday::Tue),
        2 => Ok(Weekday::Wed),
        3 => Ok(Weekday::Thu),
        4 => Ok(Weekday::Fri),
        5 => Ok(Weekday::Sat),
        6 => Ok(Weekday::Sun),
        _ => Err(DomainError::Validation(format!(
            "day_of_week {} out of range",
            index
        ))),
    }
}

fn row_to_hours(row: &provider_schedule::Model) -> DomainResult<WorkingHours> {
    match (row.break_start, row.break_end) {
        (Some(break_start), Some(break_end)) => {
            WorkingHours::with_break(row.work_start, row.work_end, break_start, break_end)
        }
        _ => WorkingHours::new(row.work_start, row.work_end),
    }
}

// ── ProviderScheduleRepository impl ─────────────────────────────

#[async_trait]
impl ProviderScheduleRepository for SeaOrmProviderScheduleRepository {
    async fn find_for_provider(&self, provider_id: Uuid) -> DomainResult<Option<WeeklySchedule>> {
        let rows = provider_schedule::Entity::find()
            .filter(provider_schedule::Column::ProviderId.eq(provider_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut schedule = WeeklySchedule::closed();
        for row in &rows {
            if !row.is_working_day {
                continue;
            }
            let weekday = weekday_from_index(row.day_of_week)?;
            schedule.set_day(weekday, DaySchedule::Working(row_to_hours(row)?));
        }
        Ok(Some(schedule))
    }

    async fn save_for_provider(
        &self,
        provider_id: Uuid,
        schedule: WeeklySchedule,
    ) -> DomainResult<()> {
        debug!("Replacing schedule for provider {}", provider_id);

        provider_schedule::Entity::delete_many()
            .filter(provider_schedule::Column::ProviderId.eq(provider_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        let mut rows = Vec::new();
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            let DaySchedule::Working(hours) = schedule.day(weekday) else {
                continue;
            };
            let (break_start, break_end) = match hours.break_bounds() {
                Some((start, end)) => (Some(start), Some(end)),
                None => (None, None),
            };
            rows.push(provider_schedule::ActiveModel {
                provider_id: Set(provider_id),
                day_of_week: Set(weekday.num_days_from_monday() as i16),
                is_working_day: Set(true),
                work_start: Set(hours.work_start()),
                work_end: Set(hours.work_end()),
                break_start: Set(break_start),
                break_end: Set(break_end),
                ..Default::default()
            });
        }

        if !rows.is_empty() {
            provider_schedule::Entity::insert_many(rows)
                .exec(&self.db)
                .await
                .map_err(db_err)?;
        }
        Ok(())
    }
}
