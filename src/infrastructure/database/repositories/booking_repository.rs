//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::debug;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::{cents_to_decimal, db_err, decimal_to_cents};
use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::time_window::TimeWindow;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        provider_id: m.provider_id,
        customer_id: m.customer_id,
        service_id: m.service_id,
        date: m.date,
        start_time: m.start_time,
        duration_minutes: i64::from(m.duration_minutes),
        status: BookingStatus::from_str(&m.status),
        total_price: cents_to_decimal(m.total_price_cents),
        paid_amount: cents_to_decimal(m.paid_amount_cents),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

/// Half-open overlap test on a fetched row; `end = start + duration` is
/// not a column, so the window comparison runs here rather than in SQL.
fn overlaps_window(m: &booking::Model, window: &TimeWindow) -> bool {
    let start = m.date.and_time(m.start_time).and_utc();
    let end = start + chrono::Duration::minutes(i64::from(m.duration_minutes));
    start < window.end() && window.start() < end
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn save(&self, b: Booking) -> DomainResult<()> {
        debug!("Saving booking: {}", b.id);

        let model = booking::ActiveModel {
            id: Set(b.id),
            provider_id: Set(b.provider_id),
            customer_id: Set(b.customer_id),
            service_id: Set(b.service_id),
            date: Set(b.date),
            start_time: Set(b.start_time),
            duration_minutes: Set(b.duration_minutes as i32),
            status: Set(b.status.as_str().to_string()),
            total_price_cents: Set(decimal_to_cents(b.total_price)?),
            paid_amount_cents: Set(decimal_to_cents(b.paid_amount)?),
            created_at: Set(b.created_at),
            updated_at: Set(b.updated_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_active_overlapping(
        &self,
        provider_id: Uuid,
        window: &TimeWindow,
        exclude_id: Option<Uuid>,
    ) -> DomainResult<Vec<Booking>> {
        let mut query = booking::Entity::find()
            .filter(booking::Column::ProviderId.eq(provider_id))
            .filter(booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
            .filter(booking::Column::Date.between(
                window.start().date_naive(),
                window.end().date_naive(),
            ));
        if let Some(exclude) = exclude_id {
            query = query.filter(booking::Column::Id.ne(exclude));
        }

        let models = query.all(&self.db).await.map_err(db_err)?;
        Ok(models
            .into_iter()
            .filter(|m| overlaps_window(m, window))
            .map(model_to_domain)
            .collect())
    }

    async fn find_active_overlapping_for_customer(
        &self,
        customer_id: Uuid,
        window: &TimeWindow,
        exclude_id: Option<Uuid>,
    ) -> DomainResult<Vec<Booking>> {
        let mut query = booking::Entity::find()
            .filter(booking::Column::CustomerId.eq(customer_id))
            .filter(booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
            .filter(booking::Column::Date.between(
                window.start().date_naive(),
                window.end().date_naive(),
            ));
        if let Some(exclude) = exclude_id {
            query = query.filter(booking::Column::Id.ne(exclude));
        }

        let models = query.all(&self.db).await.map_err(db_err)?;
        Ok(models
            .into_iter()
            .filter(|m| overlaps_window(m, window))
            .map(model_to_domain)
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: booking::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(now);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update_schedule(
        &self,
        id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: booking::ActiveModel = existing.into();
        active.date = Set(date);
        active.start_time = Set(start_time);
        active.duration_minutes = Set(duration_minutes as i32);
        active.updated_at = Set(now);
        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }
}
