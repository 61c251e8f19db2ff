//! Reservation store interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::{ReservationStatus, SlotReservation};
use crate::domain::time_window::TimeWindow;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Insert the reservation iff its window is free of active bookings and
    /// unexpired holds for the provider.
    ///
    /// The availability check and the insert MUST execute as one atomic
    /// unit — this is the sole concurrency guard against two customers
    /// claiming the same window. Fails with
    /// [`DomainError::SlotUnavailable`](crate::shared::errors::DomainError).
    async fn insert_if_available(
        &self,
        reservation: SlotReservation,
        now: DateTime<Utc>,
    ) -> DomainResult<SlotReservation>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<SlotReservation>>;

    /// Set the reservation status; `false` when the id is unknown.
    async fn update_status(&self, id: Uuid, status: ReservationStatus) -> DomainResult<bool>;

    /// Unexpired `Reserved` holds of the provider overlapping `window`.
    async fn find_active_overlapping(
        &self,
        provider_id: Uuid,
        window: &TimeWindow,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<SlotReservation>>;

    /// `Reserved` holds whose TTL has elapsed (`reserved_until < now`).
    async fn find_expired(&self, now: DateTime<Utc>) -> DomainResult<Vec<SlotReservation>>;
}
