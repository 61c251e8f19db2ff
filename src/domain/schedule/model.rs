//! Weekly schedule domain entity

use chrono::{NaiveTime, Weekday};

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Working hours for a single day, with an optional mid-day break.
///
/// Invariants: `work_start < work_end`; a break, when present, lies
/// entirely within the working hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingHours {
    work_start: NaiveTime,
    work_end: NaiveTime,
    break_start: Option<NaiveTime>,
    break_end: Option<NaiveTime>,
}

impl WorkingHours {
    pub fn new(work_start: NaiveTime, work_end: NaiveTime) -> DomainResult<Self> {
        if work_start >= work_end {
            return Err(DomainError::Validation(format!(
                "work_start {} must be before work_end {}",
                work_start, work_end
            )));
        }
        Ok(Self {
            work_start,
            work_end,
            break_start: None,
            break_end: None,
        })
    }

    pub fn with_break(
        work_start: NaiveTime,
        work_end: NaiveTime,
        break_start: NaiveTime,
        break_end: NaiveTime,
    ) -> DomainResult<Self> {
        let mut hours = Self::new(work_start, work_end)?;
        if break_start >= break_end {
            return Err(DomainError::Validation(format!(
                "break_start {} must be before break_end {}",
                break_start, break_end
            )));
        }
        if break_start < work_start || break_end > work_end {
            return Err(DomainError::Validation(format!(
                "break {}..{} must lie within working hours {}..{}",
                break_start, break_end, work_start, work_end
            )));
        }
        hours.break_start = Some(break_start);
        hours.break_end = Some(break_end);
        Ok(hours)
    }

    pub fn work_start(&self) -> NaiveTime {
        self.work_start
    }

    pub fn work_end(&self) -> NaiveTime {
        self.work_end
    }

    pub fn break_bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.break_start.zip(self.break_end)
    }
}

/// Schedule entry for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DaySchedule {
    /// Provider does not work this day
    #[default]
    Closed,
    /// Provider works this day
    Working(WorkingHours),
}

impl DaySchedule {
    pub fn is_working(&self) -> bool {
        matches!(self, DaySchedule::Working(_))
    }
}

/// A provider's recurring weekly schedule, indexed by day of week.
///
/// Read-only to the engine; mutated only through provider-profile updates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeeklySchedule {
    days: [DaySchedule; 7],
}

impl WeeklySchedule {
    /// Schedule with every day closed.
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, weekday: Weekday, hours: WorkingHours) -> Self {
        self.set_day(weekday, DaySchedule::Working(hours));
        self
    }

    pub fn set_day(&mut self, weekday: Weekday, schedule: DaySchedule) {
        self.days[weekday.num_days_from_monday() as usize] = schedule;
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn working_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_working()).count()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    #[test]
    fn rejects_inverted_working_hours() {
        assert!(WorkingHours::new(t(18, 0), t(9, 0)).is_err());
        assert!(WorkingHours::new(t(9, 0), t(9, 0)).is_err());
    }

    #[test]
    fn rejects_break_outside_working_hours() {
        assert!(WorkingHours::with_break(t(9, 0), t(18, 0), t(8, 0), t(10, 0)).is_err());
        assert!(WorkingHours::with_break(t(9, 0), t(18, 0), t(17, 0), t(19, 0)).is_err());
        assert!(WorkingHours::with_break(t(9, 0), t(18, 0), t(14, 0), t(13, 0)).is_err());
    }

    #[test]
    fn break_within_hours_is_accepted() {
        let hours = WorkingHours::with_break(t(9, 0), t(18, 0), t(13, 0), t(14, 0)).unwrap();
        assert_eq!(hours.break_bounds(), Some((t(13, 0), t(14, 0))));
    }

    #[test]
    fn days_default_to_closed() {
        let schedule = WeeklySchedule::closed();
        assert!(!schedule.day(Weekday::Mon).is_working());
        assert_eq!(schedule.working_days(), 0);
    }

    #[test]
    fn with_day_sets_the_right_weekday() {
        let hours = WorkingHours::new(t(9, 0), t(18, 0)).unwrap();
        let schedule = WeeklySchedule::closed().with_day(Weekday::Tue, hours);
        assert!(schedule.day(Weekday::Tue).is_working());
        assert!(!schedule.day(Weekday::Wed).is_working());
        assert_eq!(schedule.working_days(), 1);
    }
}
