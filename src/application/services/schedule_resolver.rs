//! Schedule resolution service
//!
//! Turns a provider's recurring weekly schedule and a calendar date into
//! absolute working and break intervals for that date.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::domain::schedule::{DaySchedule, ProviderScheduleRepository};
use crate::domain::time_window::TimeWindow;
use crate::domain::{DomainError, DomainResult};
use uuid::Uuid;

/// A provider's resolved working day: open hours minus breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDay {
    pub hours: TimeWindow,
    pub breaks: Vec<TimeWindow>,
}

impl WorkingDay {
    /// A window is bookable when it fits inside the open hours and does
    /// not touch a break.
    pub fn is_bookable(&self, window: &TimeWindow) -> bool {
        self.hours.contains(window) && self.breaks.iter().all(|b| !b.overlaps(window))
    }
}

/// Service resolving weekly schedules against calendar dates
pub struct ScheduleResolver {
    schedules: Arc<dyn ProviderScheduleRepository>,
}

impl ScheduleResolver {
    pub fn new(schedules: Arc<dyn ProviderScheduleRepository>) -> Self {
        Self { schedules }
    }

    /// Resolve the working interval and breaks of `provider_id` on `date`.
    ///
    /// Fails with [`DomainError::NotWorkingDay`] when the provider has no
    /// schedule or is off that day; callers on read paths treat that as
    /// zero slots, not as an error to surface.
    pub async fn working_day(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
    ) -> DomainResult<WorkingDay> {
        let not_working = || DomainError::NotWorkingDay { provider_id, date };

        let schedule = self
            .schedules
            .find_for_provider(provider_id)
            .await?
            .ok_or_else(not_working)?;

        let hours = match schedule.day(date.weekday()) {
            DaySchedule::Closed => return Err(not_working()),
            DaySchedule::Working(hours) => hours.clone(),
        };

        let working = TimeWindow::new(
            anchor(date, hours.work_start()),
            anchor(date, hours.work_end()),
        )?;

        let breaks = match hours.break_bounds() {
            Some((break_start, break_end)) => {
                vec![TimeWindow::new(
                    anchor(date, break_start),
                    anchor(date, break_end),
                )?]
            }
            None => Vec::new(),
        };

        Ok(WorkingDay {
            hours: working,
            breaks,
        })
    }
}

/// Anchor a time-of-day onto a calendar date as an absolute instant.
pub(crate) fn anchor(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::{WeeklySchedule, WorkingHours};
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::{TimeZone, Weekday};

    fn t(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    async fn resolver_with_weekday_schedule(provider_id: Uuid) -> ScheduleResolver {
        let storage = Arc::new(InMemoryStorage::new());
        let hours = WorkingHours::with_break(t(9, 0), t(18, 0), t(13, 0), t(14, 0)).unwrap();
        let schedule = WeeklySchedule::closed()
            .with_day(Weekday::Mon, hours.clone())
            .with_day(Weekday::Tue, hours);
        storage
            .save_for_provider(provider_id, schedule)
            .await
            .unwrap();
        ScheduleResolver::new(storage)
    }

    #[tokio::test]
    async fn resolves_working_day_with_break() {
        let provider_id = Uuid::new_v4();
        let resolver = resolver_with_weekday_schedule(provider_id).await;

        // 2026-03-02 is a Monday
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let day = resolver.working_day(provider_id, monday).await.unwrap();

        assert_eq!(
            day.hours.start(),
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
        );
        assert_eq!(
            day.hours.end(),
            Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap()
        );
        assert_eq!(day.breaks.len(), 1);
        assert_eq!(
            day.breaks[0].start(),
            Utc.with_ymd_and_hms(2026, 3, 2, 13, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn closed_day_is_not_working() {
        let provider_id = Uuid::new_v4();
        let resolver = resolver_with_weekday_schedule(provider_id).await;

        // 2026-03-08 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let err = resolver.working_day(provider_id, sunday).await.unwrap_err();
        assert!(matches!(err, DomainError::NotWorkingDay { .. }));
    }

    #[tokio::test]
    async fn provider_without_schedule_is_not_working() {
        let storage = Arc::new(InMemoryStorage::new());
        let resolver = ScheduleResolver::new(storage);

        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let err = resolver
            .working_day(Uuid::new_v4(), monday)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotWorkingDay { .. }));
    }

    #[test]
    fn bookable_respects_hours_and_breaks() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let day = WorkingDay {
            hours: TimeWindow::new(anchor(date, t(9, 0)), anchor(date, t(18, 0))).unwrap(),
            breaks: vec![TimeWindow::new(anchor(date, t(13, 0)), anchor(date, t(14, 0))).unwrap()],
        };

        let fine = TimeWindow::new(anchor(date, t(10, 0)), anchor(date, t(11, 0))).unwrap();
        let in_break = TimeWindow::new(anchor(date, t(12, 30)), anchor(date, t(13, 30))).unwrap();
        let after_close = TimeWindow::new(anchor(date, t(17, 30)), anchor(date, t(18, 30))).unwrap();
        let touches_break = TimeWindow::new(anchor(date, t(12, 0)), anchor(date, t(13, 0))).unwrap();

        assert!(day.is_bookable(&fine));
        assert!(!day.is_bookable(&in_break));
        assert!(!day.is_bookable(&after_close));
        assert!(day.is_bookable(&touches_break));
    }
}
