//! Slot reservation domain entity

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::time_window::TimeWindow;

/// Reservation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Hold is in place (until `reserved_until`)
    Reserved,
    /// Released explicitly or converted into a confirmed booking
    Released,
    /// Hold TTL elapsed
    Expired,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "Reserved",
            Self::Released => "Released",
            Self::Expired => "Expired",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Reserved" => Self::Reserved,
            "Released" => Self::Released,
            "Expired" => Self::Expired,
            _ => Self::Expired,
        }
    }

    /// Released and Expired are terminal; no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Reserved)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Short-lived hold on a slot, tying it to the requesting customer prior
/// to full booking confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotReservation {
    /// Unique reservation ID
    pub id: Uuid,
    pub provider_id: Uuid,
    pub customer_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    /// Hard TTL; past this instant the hold no longer blocks anything
    pub reserved_until: DateTime<Utc>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl SlotReservation {
    pub fn new(
        id: Uuid,
        provider_id: Uuid,
        customer_id: Uuid,
        window: &TimeWindow,
        reserved_until: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            provider_id,
            customer_id,
            date: window.start().date_naive(),
            start_time: window.start().time(),
            duration_minutes: window.duration_minutes(),
            reserved_until,
            status: ReservationStatus::Reserved,
            created_at,
        }
    }

    pub fn start_instant(&self) -> DateTime<Utc> {
        self.date.and_time(self.start_time).and_utc()
    }

    pub fn end_instant(&self) -> DateTime<Utc> {
        self.start_instant() + Duration::minutes(self.duration_minutes)
    }

    /// Expiry is detected lazily at read time; no timer required.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == ReservationStatus::Expired || now > self.reserved_until
    }

    /// An active hold blocks the window for everyone else.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status == ReservationStatus::Reserved && now <= self.reserved_until
    }

    /// Mark as released
    pub fn release(&mut self) {
        self.status = ReservationStatus::Released;
    }

    /// Mark as expired
    pub fn expire(&mut self) {
        self.status = ReservationStatus::Expired;
    }
}

// ── Tests ──────────────────────────────────────────────────────
