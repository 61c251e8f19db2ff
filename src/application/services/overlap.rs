//! Conflict detection service
//!
//! Read-only queries deciding whether a candidate window collides with
//! existing bookings or unexpired slot holds.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::booking::BookingRepository;
use crate::domain::reservation::ReservationStore;
use crate::domain::time_window::TimeWindow;
use crate::domain::DomainResult;

/// Service answering "is this window taken?"
pub struct OverlapChecker {
    bookings: Arc<dyn BookingRepository>,
    reservations: Arc<dyn ReservationStore>,
}

impl OverlapChecker {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        reservations: Arc<dyn ReservationStore>,
    ) -> Self {
        Self {
            bookings,
            reservations,
        }
    }

    /// True if any active booking or unexpired hold of the provider
    /// overlaps `window`. Pass `exclude_booking` when re-validating a
    /// reschedule of that same booking.
    ///
    /// Released and expired holds never block; half-open semantics, so a
    /// booking ending exactly at `window.start()` does not count.
    pub async fn has_conflict(
        &self,
        provider_id: Uuid,
        window: &TimeWindow,
        exclude_booking: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let booked = self
            .bookings
            .find_active_overlapping(provider_id, window, exclude_booking)
            .await?;
        if !booked.is_empty() {
            return Ok(true);
        }

        let held = self
            .reservations
            .find_active_overlapping(provider_id, window, now)
            .await?;
        Ok(!held.is_empty())
    }

    /// Symmetric check against the customer's own bookings across all
    /// providers, preventing a customer from double-booking themselves.
    pub async fn customer_has_conflict(
        &self,
        customer_id: Uuid,
        window: &TimeWindow,
        exclude_booking: Option<Uuid>,
    ) -> DomainResult<bool> {
        let booked = self
            .bookings
            .find_active_overlapping_for_customer(customer_id, window, exclude_booking)
            .await?;
        Ok(!booked.is_empty())
    }
}

// ── Tests ──────────────────────────────────────────────────────
