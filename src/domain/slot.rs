//! Slot values and the availability-cache port
//!
//! Slots are ephemeral computed views, never persisted; a fresh
//! availability check produces a fresh slot list.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A candidate start time for a service, annotated with availability.
///
/// Unavailable slots are part of the view (shown as "booked" by a UI),
/// not silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    pub available: bool,
}

impl Slot {
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.date.and_time(self.start_time).and_utc()
    }
}

/// Tick-level occupancy aggregates for a provider over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyStats {
    pub total_slots: usize,
    pub available_slots: usize,
    pub busy_slots: usize,
    /// busy / total, percent, 2 decimals
    pub occupancy_rate: f64,
    /// available / total, percent, 2 decimals
    pub availability_rate: f64,
}

impl OccupancyStats {
    pub fn from_counts(total: usize, available: usize) -> Self {
        let busy = total - available;
        Self {
            total_slots: total,
            available_slots: available,
            busy_slots: busy,
            occupancy_rate: percentage(busy, total),
            availability_rate: percentage(available, total),
        }
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}

/// Cache key for a generated day of slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotCacheKey {
    pub provider_id: Uuid,
    pub date: NaiveDate,
    pub duration_minutes: i64,
}

/// Availability cache port.
///
/// TTL-bounded staleness is acceptable on read paths; every mutation of a
/// provider's day must go through `invalidate_day` so the next read
/// reflects it.
#[async_trait]
pub trait SlotCache: Send + Sync {
    async fn get(&self, key: &SlotCacheKey, now: DateTime<Utc>) -> Option<Vec<Slot>>;

    async fn put(&self, key: SlotCacheKey, slots: Vec<Slot>, now: DateTime<Utc>);

    /// Drop every cached entry for `(provider_id, date)`, whatever the
    /// duration component of the key.
    async fn invalidate_day(&self, provider_id: Uuid, date: NaiveDate);
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_rates_round_to_two_decimals() {
        let stats = OccupancyStats::from_counts(16, 14);
        assert_eq!(stats.busy_slots, 2);
        assert_eq!(stats.occupancy_rate, 12.5);
        assert_eq!(stats.availability_rate, 87.5);

        let thirds = OccupancyStats::from_counts(3, 1);
        assert_eq!(thirds.occupancy_rate, 66.67);
        assert_eq!(thirds.availability_rate, 33.33);
    }

    #[test]
    fn empty_range_has_zero_rates() {
        let stats = OccupancyStats::from_counts(0, 0);
        assert_eq!(stats.total_slots, 0);
        assert_eq!(stats.occupancy_rate, 0.0);
        assert_eq!(stats.availability_rate, 0.0);
    }

    #[test]
    fn slot_serializes_to_plain_structured_data() {
        let slot = Slot {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            duration_minutes: 60,
            available: true,
        };
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["date"], "2026-03-02");
        assert_eq!(json["start_time"], "09:30:00");
        assert_eq!(json["duration_minutes"], 60);
        assert_eq!(json["available"], true);
    }
}
