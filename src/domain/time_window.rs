//! Time window value type
//!
//! The shared time-arithmetic core: half-open interval overlap and the
//! signed "hours until" computation used by both slot generation and
//! cancellation-fee tiers, so the two subsystems agree on "how soon."

use chrono::{DateTime, Duration, Utc};

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Half-open time interval `[start, end)`.
///
/// Invariant: `end > start`, enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if end <= start {
            return Err(DomainError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a window from a start instant and a positive duration in minutes.
    pub fn from_start(start: DateTime<Utc>, duration_minutes: i64) -> DomainResult<Self> {
        Self::new(start, start + Duration::minutes(duration_minutes))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// True iff the two windows share any instant.
    ///
    /// Half-open semantics: a window ending exactly where the other starts
    /// does not overlap it.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True iff `other` lies entirely within this window.
    pub fn contains(&self, other: &TimeWindow) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Signed hours from `now` until this window opens.
    pub fn hours_until_start(&self, now: DateTime<Utc>) -> f64 {
        hours_until(self.start, now)
    }
}

/// Signed difference in hours between `instant` and `now`.
///
/// Negative means the instant is already in the past.
pub fn hours_until(instant: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (instant - now).num_seconds() as f64 / 3600.0
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
    }

    #[test]
    fn rejects_inverted_and_empty_windows() {
        assert!(TimeWindow::new(at(10, 0), at(9, 0)).is_err());
        assert!(TimeWindow::new(at(10, 0), at(10, 0)).is_err());
        assert!(TimeWindow::from_start(at(10, 0), 0).is_err());
        assert!(TimeWindow::from_start(at(10, 0), -30).is_err());
    }

    #[test]
    fn duration_in_minutes() {
        let w = TimeWindow::new(at(10, 0), at(11, 30)).unwrap();
        assert_eq!(w.duration_minutes(), 90);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = TimeWindow::new(at(10, 0), at(11, 0)).unwrap();
        let b = TimeWindow::new(at(10, 30), at(11, 30)).unwrap();
        let c = TimeWindow::new(at(12, 0), at(13, 0)).unwrap();

        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert!(a.overlaps(&b));
        assert_eq!(a.overlaps(&c), c.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        let first = TimeWindow::new(at(10, 0), at(10, 30)).unwrap();
        let second = TimeWindow::new(at(10, 30), at(11, 0)).unwrap();
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn containment() {
        let day = TimeWindow::new(at(9, 0), at(18, 0)).unwrap();
        let inner = TimeWindow::new(at(10, 0), at(11, 0)).unwrap();
        let spill = TimeWindow::new(at(17, 30), at(18, 30)).unwrap();
        assert!(day.contains(&inner));
        assert!(day.contains(&day));
        assert!(!day.contains(&spill));
    }

    #[test]
    fn hours_until_is_signed() {
        let now = at(12, 0);
        assert_eq!(hours_until(at(14, 0), now), 2.0);
        assert_eq!(hours_until(at(11, 30), now), -0.5);
        assert_eq!(hours_until(now, now), 0.0);
    }
}
