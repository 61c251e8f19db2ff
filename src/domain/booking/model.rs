//! Booking domain entity

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Booking status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStatus {
    /// Created, awaiting provider confirmation
    Pending,
    /// Confirmed by the provider
    Confirmed,
    /// Service currently underway
    InProgress,
    /// Service delivered
    Completed,
    /// Cancelled by either party
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Confirmed" => Self::Confirmed,
            "InProgress" => Self::InProgress,
            "Completed" => Self::Completed,
            "Cancelled" => Self::Cancelled,
            _ => Self::Cancelled,
        }
    }

    /// Active bookings claim their time window; only cancellation frees it.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Customer booking of a provider's service
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Unique booking ID
    pub id: Uuid,
    pub provider_id: Uuid,
    pub customer_id: Uuid,
    /// Booked service, if the booking came through the catalog
    pub service_id: Option<Uuid>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub paid_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        provider_id: Uuid,
        customer_id: Uuid,
        service_id: Option<Uuid>,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: i64,
        total_price: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            provider_id,
            customer_id,
            service_id,
            date,
            start_time,
            duration_minutes,
            status: BookingStatus::Pending,
            total_price,
            paid_amount: Decimal::ZERO,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn start_instant(&self) -> DateTime<Utc> {
        self.date.and_time(self.start_time).and_utc()
    }

    pub fn end_instant(&self) -> DateTime<Utc> {
        self.start_instant() + Duration::minutes(self.duration_minutes)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Mark as cancelled
    pub fn cancel(&mut self, now: DateTime<Utc>) {
        self.status = BookingStatus::Cancelled;
        self.updated_at = now;
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_booking() -> Booking {
        Booking::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            None,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            60,
            Decimal::from(1000),
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn new_booking_is_pending_and_active() {
        let b = sample_booking();
        assert_eq!(b.status, BookingStatus::Pending);
        assert!(b.is_active());
        assert_eq!(b.paid_amount, Decimal::ZERO);
    }

    #[test]
    fn instants_span_the_duration() {
        let b = sample_booking();
        assert_eq!(
            b.start_instant(),
            Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()
        );
        assert_eq!(
            b.end_instant(),
            Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn cancel_frees_the_window() {
        let mut b = sample_booking();
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 15, 0, 0).unwrap();
        b.cancel(now);
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert!(!b.is_active());
        assert_eq!(b.updated_at, now);
    }

    #[test]
    fn status_display_roundtrip() {
        for status in &[
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::InProgress,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            let parsed = BookingStatus::from_str(status.as_str());
            assert_eq!(&parsed, status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_cancelled() {
        assert_eq!(BookingStatus::from_str("Unknown"), BookingStatus::Cancelled);
    }
}
