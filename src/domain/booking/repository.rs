//! Booking repository interface

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use super::model::{Booking, BookingStatus};
use crate::domain::time_window::TimeWindow;
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Save a new booking
    async fn save(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;

    /// Active (non-cancelled) bookings of the provider overlapping `window`,
    /// excluding `exclude_id` when validating a reschedule of that booking.
    async fn find_active_overlapping(
        &self,
        provider_id: Uuid,
        window: &TimeWindow,
        exclude_id: Option<Uuid>,
    ) -> DomainResult<Vec<Booking>>;

    /// Active bookings of the customer overlapping `window`, across all
    /// providers.
    async fn find_active_overlapping_for_customer(
        &self,
        customer_id: Uuid,
        window: &TimeWindow,
        exclude_id: Option<Uuid>,
    ) -> DomainResult<Vec<Booking>>;

    /// Update a booking's status
    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<()>;

    /// Move a booking to a new date, start time and duration
    async fn update_schedule(
        &self,
        id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Booking>;
}
