//! Booking lifecycle service
//!
//! Cancellation quotes and execution, and reschedule validation. Payment
//! capture and refund transfer belong to the payment collaborator; this
//! service only computes what is owed and updates booking state.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::overlap::OverlapChecker;
use super::schedule_resolver::{anchor, ScheduleResolver};
use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::fee::{cancellation_fee, refund, CancellationInitiator, FeeQuote};
use crate::domain::slot::SlotCache;
use crate::domain::time_window::TimeWindow;
use crate::domain::{DomainError, DomainResult};

/// Result of a cancellation: the quote plus the refund owed to the payer.
#[derive(Debug, Clone, PartialEq)]
pub struct CancellationOutcome {
    pub booking: Booking,
    pub quote: FeeQuote,
    pub refund_amount: Decimal,
}

/// Service for booking cancellation and reschedule
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    overlap: Arc<OverlapChecker>,
    resolver: Arc<ScheduleResolver>,
    cache: Arc<dyn SlotCache>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        overlap: Arc<OverlapChecker>,
        resolver: Arc<ScheduleResolver>,
        cache: Arc<dyn SlotCache>,
    ) -> Self {
        Self {
            bookings,
            overlap,
            resolver,
            cache,
        }
    }

    /// Quote the cancellation fee without changing anything.
    pub async fn cancellation_quote(
        &self,
        booking_id: Uuid,
        initiator: CancellationInitiator,
        now: DateTime<Utc>,
    ) -> DomainResult<FeeQuote> {
        let booking = self.get_booking(booking_id).await?;
        Ok(cancellation_fee(
            booking.total_price,
            booking.start_instant(),
            now,
            initiator,
        ))
    }

    /// Cancel the booking, freeing its window, and report the refund owed.
    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        initiator: CancellationInitiator,
        now: DateTime<Utc>,
    ) -> DomainResult<CancellationOutcome> {
        let mut booking = self.get_booking(booking_id).await?;
        if !booking.is_active() {
            return Err(DomainError::Validation(format!(
                "booking {} is already cancelled",
                booking_id
            )));
        }

        let quote = cancellation_fee(
            booking.total_price,
            booking.start_instant(),
            now,
            initiator,
        );
        let refund_amount = refund(booking.paid_amount, quote.fee_amount);

        self.bookings
            .update_status(booking_id, BookingStatus::Cancelled, now)
            .await?;
        self.cache
            .invalidate_day(booking.provider_id, booking.date)
            .await;
        booking.cancel(now);

        info!(
            "Booking {} cancelled by {}: fee {} ({}%), refund {}",
            booking_id, initiator, quote.fee_amount, quote.fee_percent, refund_amount
        );

        Ok(CancellationOutcome {
            booking,
            quote,
            refund_amount,
        })
    }

    /// Move an active booking to a new window after re-validating it for
    /// both the provider and the customer, with the booking itself
    /// excluded from the conflict checks.
    pub async fn reschedule_booking(
        &self,
        booking_id: Uuid,
        new_date: NaiveDate,
        new_start_time: NaiveTime,
        new_duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        let booking = self.get_booking(booking_id).await?;
        if !booking.is_active() {
            return Err(DomainError::Validation(format!(
                "booking {} is cancelled and cannot be rescheduled",
                booking_id
            )));
        }

        let window =
            TimeWindow::from_start(anchor(new_date, new_start_time), new_duration_minutes)?;
        let unavailable = || DomainError::SlotUnavailable {
            provider_id: booking.provider_id,
            start: window.start(),
        };

        let day = match self.resolver.working_day(booking.provider_id, new_date).await {
            Ok(day) => day,
            Err(DomainError::NotWorkingDay { .. }) => return Err(unavailable()),
            Err(e) => return Err(e),
        };
        if !day.is_bookable(&window) {
            return Err(unavailable());
        }

        if self
            .overlap
            .has_conflict(booking.provider_id, &window, Some(booking_id), now)
            .await?
        {
            return Err(unavailable());
        }
        if self
            .overlap
            .customer_has_conflict(booking.customer_id, &window, Some(booking_id))
            .await?
        {
            return Err(unavailable());
        }

        let updated = self
            .bookings
            .update_schedule(booking_id, new_date, new_start_time, new_duration_minutes, now)
            .await?;

        self.cache
            .invalidate_day(booking.provider_id, booking.date)
            .await;
        if new_date != booking.date {
            self.cache
                .invalidate_day(booking.provider_id, new_date)
                .await;
        }

        info!(
            "Booking {} rescheduled from {} {} to {} {}",
            booking_id, booking.date, booking.start_time, new_date, new_start_time
        );
        Ok(updated)
    }

    async fn get_booking(&self, booking_id: Uuid) -> DomainResult<Booking> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking_id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────
