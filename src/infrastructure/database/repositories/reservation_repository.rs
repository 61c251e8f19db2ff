//! SeaORM implementation of ReservationStore
//!
//! The insert-if-available check runs inside a database transaction so
//! "verify availability, then write the hold" is one atomic unit; the
//! store, not application memory, serializes conflicting writes.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use super::db_err;
use crate::domain::booking::BookingStatus;
use crate::domain::reservation::{ReservationStatus, ReservationStore, SlotReservation};
use crate::domain::time_window::TimeWindow;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, reservation};

pub struct SeaOrmReservationStore {
    db: DatabaseConnection,
}

impl SeaOrmReservationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> SlotReservation {
    SlotReservation {
        id: m.id,
        provider_id: m.provider_id,
        customer_id: m.customer_id,
        date: m.date,
        start_time: m.start_time,
        duration_minutes: i64::from(m.duration_minutes),
        reserved_until: m.reserved_until,
        status: ReservationStatus::from_str(&m.status),
        created_at: m.created_at,
    }
}

fn reservation_overlaps(m: &reservation::Model, window: &TimeWindow) -> bool {
    let start = m.date.and_time(m.start_time).and_utc();
    let end = start + Duration::minutes(i64::from(m.duration_minutes));
    start < window.end() && window.start() < end
}

fn booking_overlaps(m: &booking::Model, window: &TimeWindow) -> bool {
    let start = m.date.and_time(m.start_time).and_utc();
    let end = start + Duration::minutes(i64::from(m.duration_minutes));
    start < window.end() && window.start() < end
}

/// Overlapping active bookings of the provider, within the transaction.
async fn booking_conflicts<C: ConnectionTrait>(
    conn: &C,
    provider_id: Uuid,
    window: &TimeWindow,
) -> DomainResult<bool> {
    let models = booking::Entity::find()
        .filter(booking::Column::ProviderId.eq(provider_id))
        .filter(booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
        .filter(booking::Column::Date.between(
            window.start().date_naive(),
            window.end().date_naive(),
        ))
        .all(conn)
        .await
        .map_err(db_err)?;
    Ok(models.iter().any(|m| booking_overlaps(m, window)))
}

/// Overlapping unexpired holds of the provider, within the transaction.
async fn hold_conflicts<C: ConnectionTrait>(
    conn: &C,
    provider_id: Uuid,
    window: &TimeWindow,
    now: DateTime<Utc>,
) -> DomainResult<bool> {
    let models = reservation::Entity::find()
        .filter(reservation::Column::ProviderId.eq(provider_id))
        .filter(reservation::Column::Status.eq(ReservationStatus::Reserved.as_str()))
        .filter(reservation::Column::ReservedUntil.gte(now))
        .filter(reservation::Column::Date.between(
            window.start().date_naive(),
            window.end().date_naive(),
        ))
        .all(conn)
        .await
        .map_err(db_err)?;
    Ok(models.iter().any(|m| reservation_overlaps(m, window)))
}

// ── ReservationStore impl ───────────────────────────────────────

#[async_trait]
impl ReservationStore for SeaOrmReservationStore {
    async fn insert_if_available(
        &self,
        r: SlotReservation,
        now: DateTime<Utc>,
    ) -> DomainResult<SlotReservation> {
        let window = TimeWindow::from_start(r.start_instant(), r.duration_minutes)?;

        let txn = self.db.begin().await.map_err(db_err)?;

        if booking_conflicts(&txn, r.provider_id, &window).await?
            || hold_conflicts(&txn, r.provider_id, &window, now).await?
        {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::SlotUnavailable {
                provider_id: r.provider_id,
                start: window.start(),
            });
        }

        let model = reservation::ActiveModel {
            id: Set(r.id),
            provider_id: Set(r.provider_id),
            customer_id: Set(r.customer_id),
            date: Set(r.date),
            start_time: Set(r.start_time),
            duration_minutes: Set(r.duration_minutes as i32),
            reserved_until: Set(r.reserved_until),
            status: Set(r.status.as_str().to_string()),
            created_at: Set(r.created_at),
        };
        model.insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        debug!("Reservation {} inserted", r.id);
        Ok(r)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<SlotReservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update_status(&self, id: Uuid, status: ReservationStatus) -> DomainResult<bool> {
        let existing = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(true)
    }

    async fn find_active_overlapping(
        &self,
        provider_id: Uuid,
        window: &TimeWindow,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<SlotReservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::ProviderId.eq(provider_id))
            .filter(reservation::Column::Status.eq(ReservationStatus::Reserved.as_str()))
            .filter(reservation::Column::ReservedUntil.gte(now))
            .filter(reservation::Column::Date.between(
                window.start().date_naive(),
                window.end().date_naive(),
            ))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .filter(|m| reservation_overlaps(m, window))
            .map(model_to_domain)
            .collect())
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> DomainResult<Vec<SlotReservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::Status.eq(ReservationStatus::Reserved.as_str()))
            .filter(reservation::Column::ReservedUntil.lt(now))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
