//! Slot generation service
//!
//! Walks a provider's working day in fixed ticks, classifies each
//! candidate window against existing bookings and holds, and caches the
//! per-day result. Also answers nearest-available-slot searches and
//! occupancy statistics over a date range.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use log::debug;
use uuid::Uuid;

use super::overlap::OverlapChecker;
use super::schedule_resolver::{ScheduleResolver, WorkingDay};
use crate::config::EngineConfig;
use crate::domain::service::ServiceRepository;
use crate::domain::slot::{OccupancyStats, Slot, SlotCache, SlotCacheKey};
use crate::domain::time_window::{hours_until, TimeWindow};
use crate::domain::{DomainError, DomainResult};

/// Service generating annotated availability views
pub struct SlotGenerator {
    resolver: Arc<ScheduleResolver>,
    overlap: Arc<OverlapChecker>,
    services: Arc<dyn ServiceRepository>,
    cache: Arc<dyn SlotCache>,
    config: EngineConfig,
}

impl SlotGenerator {
    pub fn new(
        resolver: Arc<ScheduleResolver>,
        overlap: Arc<OverlapChecker>,
        services: Arc<dyn ServiceRepository>,
        cache: Arc<dyn SlotCache>,
        config: EngineConfig,
    ) -> Self {
        Self {
            resolver,
            overlap,
            services,
            cache,
            config,
        }
    }

    /// Per-date slot lists for `service_id` over
    /// `[from_date, from_date + days_ahead]`.
    ///
    /// Days the provider does not work are omitted from the map; an
    /// unknown service degrades to an empty map.
    pub async fn available_slots(
        &self,
        provider_id: Uuid,
        service_id: Uuid,
        from_date: NaiveDate,
        days_ahead: u32,
        now: DateTime<Utc>,
    ) -> DomainResult<BTreeMap<NaiveDate, Vec<Slot>>> {
        let Some(service) = self.services.find_by_id(service_id).await? else {
            return Ok(BTreeMap::new());
        };

        let mut by_date = BTreeMap::new();
        for offset in 0..=i64::from(days_ahead) {
            let date = from_date + Duration::days(offset);
            match self
                .day_slots(provider_id, date, service.duration_minutes, now)
                .await
            {
                Ok(slots) => {
                    by_date.insert(date, slots);
                }
                Err(DomainError::NotWorkingDay { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(by_date)
    }

    /// Slots of one day for an explicit duration, served from the cache
    /// when a fresh enough entry exists.
    pub async fn day_slots(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
        duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Slot>> {
        let key = SlotCacheKey {
            provider_id,
            date,
            duration_minutes,
        };
        if let Some(cached) = self.cache.get(&key, now).await {
            debug!("Slot cache hit for provider {} on {}", provider_id, date);
            return Ok(cached);
        }

        let day = self.resolver.working_day(provider_id, date).await?;
        let slots = self
            .walk_day(provider_id, &day, duration_minutes, now, true)
            .await?;
        self.cache.put(key, slots.clone(), now).await;
        Ok(slots)
    }

    /// Tick-walk one resolved day.
    ///
    /// Past ticks and ticks intersecting a break are skipped entirely;
    /// conflicting ticks are emitted with `available = false`.
    async fn walk_day(
        &self,
        provider_id: Uuid,
        day: &WorkingDay,
        duration_minutes: i64,
        now: DateTime<Utc>,
        skip_past: bool,
    ) -> DomainResult<Vec<Slot>> {
        let mut slots = Vec::new();
        let mut cursor = day.hours.start();

        while cursor + Duration::minutes(duration_minutes) <= day.hours.end() {
            let window = TimeWindow::from_start(cursor, duration_minutes)?;
            let in_past = skip_past && hours_until(cursor, now) < 0.0;
            let in_break = day.breaks.iter().any(|b| b.overlaps(&window));

            if !in_past && !in_break {
                let conflict = self
                    .overlap
                    .has_conflict(provider_id, &window, None, now)
                    .await?;
                slots.push(Slot {
                    date: cursor.date_naive(),
                    start_time: cursor.time(),
                    duration_minutes,
                    available: !conflict,
                });
            }

            cursor += self.config.tick();
        }

        Ok(slots)
    }

    /// First available slot at or after `preferred_time`, scanning forward
    /// in duration-aligned steps for up to `search_days` days.
    ///
    /// Crossing the late-hour cutoff (or the end of a working day) jumps
    /// the scan to the next working day's opening rather than continuing
    /// past closing.
    pub async fn find_nearest_available_slot(
        &self,
        provider_id: Uuid,
        preferred_time: DateTime<Utc>,
        duration_minutes: i64,
        search_days: u32,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Slot>> {
        let horizon = preferred_time.date_naive() + Duration::days(i64::from(search_days));
        let mut cursor = preferred_time;

        while cursor.date_naive() <= horizon {
            if cursor.time().hour() >= self.config.late_cutoff_hour {
                match self
                    .next_opening(provider_id, cursor.date_naive() + Duration::days(1), horizon)
                    .await?
                {
                    Some(opening) => {
                        cursor = opening;
                        continue;
                    }
                    None => return Ok(None),
                }
            }

            let day = match self.resolver.working_day(provider_id, cursor.date_naive()).await {
                Ok(day) => day,
                Err(DomainError::NotWorkingDay { .. }) => {
                    match self
                        .next_opening(provider_id, cursor.date_naive() + Duration::days(1), horizon)
                        .await?
                    {
                        Some(opening) => {
                            cursor = opening;
                            continue;
                        }
                        None => return Ok(None),
                    }
                }
                Err(e) => return Err(e),
            };

            if cursor < day.hours.start() {
                cursor = day.hours.start();
            }

            let window = TimeWindow::from_start(cursor, duration_minutes)?;
            if window.end() > day.hours.end() {
                match self
                    .next_opening(provider_id, cursor.date_naive() + Duration::days(1), horizon)
                    .await?
                {
                    Some(opening) => {
                        cursor = opening;
                        continue;
                    }
                    None => return Ok(None),
                }
            }

            let bookable = day.is_bookable(&window) && hours_until(cursor, now) >= 0.0;
            if bookable
                && !self
                    .overlap
                    .has_conflict(provider_id, &window, None, now)
                    .await?
            {
                return Ok(Some(Slot {
                    date: cursor.date_naive(),
                    start_time: cursor.time(),
                    duration_minutes,
                    available: true,
                }));
            }

            cursor += Duration::minutes(duration_minutes);
        }

        Ok(None)
    }

    /// Opening instant of the first working day at or after `from`,
    /// within the horizon.
    async fn next_opening(
        &self,
        provider_id: Uuid,
        from: NaiveDate,
        horizon: NaiveDate,
    ) -> DomainResult<Option<DateTime<Utc>>> {
        let mut date = from;
        while date <= horizon {
            match self.resolver.working_day(provider_id, date).await {
                Ok(day) => return Ok(Some(day.hours.start())),
                Err(DomainError::NotWorkingDay { .. }) => date += Duration::days(1),
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Tick-level occupancy aggregates over `[from_date, to_date]`.
    ///
    /// Counts ticks at the configured interval without the past-skip, so
    /// historical ranges give stable numbers.
    pub async fn occupancy_stats(
        &self,
        provider_id: Uuid,
        from_date: NaiveDate,
        to_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<OccupancyStats> {
        let mut total = 0;
        let mut available = 0;

        let mut date = from_date;
        while date <= to_date {
            match self.resolver.working_day(provider_id, date).await {
                Ok(day) => {
                    let slots = self
                        .walk_day(
                            provider_id,
                            &day,
                            self.config.slot_interval_minutes,
                            now,
                            false,
                        )
                        .await?;
                    total += slots.len();
                    available += slots.iter().filter(|s| s.available).count();
                }
                Err(DomainError::NotWorkingDay { .. }) => {}
                Err(e) => return Err(e),
            }
            date += Duration::days(1);
        }

        Ok(OccupancyStats::from_counts(total, available))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{Booking, BookingRepository};
    use crate::domain::schedule::{ProviderScheduleRepository, WeeklySchedule, WorkingHours};
    use crate::domain::service::Service;
    use crate::infrastructure::cache::InMemorySlotCache;
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::{NaiveTime, TimeZone, Weekday};
    use rust_decimal::Decimal;

    fn t(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    /// Monday of the fixture week, 06:00 — before opening.
    fn sample_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    struct Fixture {
        storage: Arc<InMemoryStorage>,
        cache: Arc<InMemorySlotCache>,
        generator: SlotGenerator,
        provider_id: Uuid,
        service_id: Uuid,
    }

    /// Provider working Mon–Sat 09:00–18:00 with a 13:00–14:00 break,
    /// closed Sundays; one 60-minute service.
    async fn fixture() -> Fixture {
        let storage = Arc::new(InMemoryStorage::new());
        let cache = Arc::new(InMemorySlotCache::new(300));
        let provider_id = Uuid::new_v4();
        let service_id = Uuid::new_v4();

        let hours = WorkingHours::with_break(t(9, 0), t(18, 0), t(13, 0), t(14, 0)).unwrap();
        let mut schedule = WeeklySchedule::closed();
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ] {
            schedule = schedule.with_day(weekday, hours.clone());
        }
        storage
            .save_for_provider(provider_id, schedule)
            .await
            .unwrap();
        ServiceRepository::save(
            storage.as_ref(),
            Service::new(
                service_id,
                "Deep tissue massage",
                60,
                Decimal::from(1000),
                sample_now(),
            ),
        )
        .await
        .unwrap();

        let resolver = Arc::new(ScheduleResolver::new(storage.clone()));
        let overlap = Arc::new(OverlapChecker::new(storage.clone(), storage.clone()));
        let generator = SlotGenerator::new(
            resolver,
            overlap,
            storage.clone(),
            cache.clone(),
            EngineConfig::default(),
        );

        Fixture {
            storage,
            cache,
            generator,
            provider_id,
            service_id,
        }
    }

    fn break_window() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2026, 3, 2, 13, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn day_walk_respects_breaks_and_closing() {
        let f = fixture().await;
        let slots = f
            .generator
            .day_slots(f.provider_id, monday(), 60, sample_now())
            .await
            .unwrap();

        // 09:00..17:00 in 30-minute ticks = 17 candidates, minus the three
        // whose window intersects the 13:00–14:00 break
        assert_eq!(slots.len(), 14);
        for slot in &slots {
            let window = TimeWindow::from_start(slot.start_instant(), 60).unwrap();
            assert!(!window.overlaps(&break_window()), "slot {:?} is in the break", slot);
            assert!(slot.available);
        }
        // the 12:30 tick would spill into the break; 14:00 resumes
        assert!(!slots.iter().any(|s| s.start_time == t(12, 30)));
        assert!(slots.iter().any(|s| s.start_time == t(12, 0)));
        assert!(slots.iter().any(|s| s.start_time == t(14, 0)));
        // last slot that still fits before 18:00
        assert_eq!(slots.last().unwrap().start_time, t(17, 0));
    }

    #[tokio::test]
    async fn booked_slots_are_emitted_as_unavailable() {
        let f = fixture().await;
        BookingRepository::save(
            f.storage.as_ref(),
            Booking::new(
                Uuid::new_v4(),
                f.provider_id,
                Uuid::new_v4(),
                Some(f.service_id),
                monday(),
                t(10, 0),
                60,
                Decimal::from(1000),
                sample_now(),
            ),
        )
        .await
        .unwrap();

        let slots = f
            .generator
            .day_slots(f.provider_id, monday(), 60, sample_now())
            .await
            .unwrap();

        assert_eq!(slots.len(), 14);
        let unavailable: Vec<_> = slots
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.start_time)
            .collect();
        // windows starting 09:30, 10:00 and 10:30 all intersect [10:00, 11:00)
        assert_eq!(unavailable, vec![t(9, 30), t(10, 0), t(10, 30)]);
    }

    #[tokio::test]
    async fn past_ticks_are_skipped() {
        let f = fixture().await;
        let mid_morning = Utc.with_ymd_and_hms(2026, 3, 2, 11, 15, 0).unwrap();
        let slots = f
            .generator
            .day_slots(f.provider_id, monday(), 60, mid_morning)
            .await
            .unwrap();

        assert!(slots.iter().all(|s| s.start_time >= t(11, 30)));
    }

    #[tokio::test]
    async fn sunday_yields_an_empty_map() {
        let f = fixture().await;
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let by_date = f
            .generator
            .available_slots(f.provider_id, f.service_id, sunday, 0, sample_now())
            .await
            .unwrap();
        assert!(by_date.is_empty());
    }

    #[tokio::test]
    async fn unknown_service_degrades_to_empty() {
        let f = fixture().await;
        let by_date = f
            .generator
            .available_slots(f.provider_id, Uuid::new_v4(), monday(), 3, sample_now())
            .await
            .unwrap();
        assert!(by_date.is_empty());
    }

    #[tokio::test]
    async fn week_listing_skips_the_closed_sunday() {
        let f = fixture().await;
        let by_date = f
            .generator
            .available_slots(f.provider_id, f.service_id, monday(), 6, sample_now())
            .await
            .unwrap();

        // Mon 2nd .. Sun 8th: six working days
        assert_eq!(by_date.len(), 6);
        assert!(!by_date.contains_key(&NaiveDate::from_ymd_opt(2026, 3, 8).unwrap()));
    }

    #[tokio::test]
    async fn day_slots_are_served_from_cache_until_invalidated() {
        let f = fixture().await;
        let first = f
            .generator
            .day_slots(f.provider_id, monday(), 60, sample_now())
            .await
            .unwrap();

        // a booking written behind the cache's back is invisible...
        BookingRepository::save(
            f.storage.as_ref(),
            Booking::new(
                Uuid::new_v4(),
                f.provider_id,
                Uuid::new_v4(),
                None,
                monday(),
                t(10, 0),
                60,
                Decimal::from(1000),
                sample_now(),
            ),
        )
        .await
        .unwrap();
        let cached = f
            .generator
            .day_slots(f.provider_id, monday(), 60, sample_now())
            .await
            .unwrap();
        assert_eq!(first, cached);

        // ...until the day is invalidated
        f.cache.invalidate_day(f.provider_id, monday()).await;
        let fresh = f
            .generator
            .day_slots(f.provider_id, monday(), 60, sample_now())
            .await
            .unwrap();
        assert!(fresh.iter().any(|s| !s.available));
    }

    #[tokio::test]
    async fn nearest_slot_steps_over_conflicts() {
        let f = fixture().await;
        BookingRepository::save(
            f.storage.as_ref(),
            Booking::new(
                Uuid::new_v4(),
                f.provider_id,
                Uuid::new_v4(),
                None,
                monday(),
                t(10, 0),
                120,
                Decimal::from(2000),
                sample_now(),
            ),
        )
        .await
        .unwrap();

        let preferred = Utc.with_ymd_and_hms(2026, 3, 2, 10, 15, 0).unwrap();
        let slot = f
            .generator
            .find_nearest_available_slot(f.provider_id, preferred, 60, 7, sample_now())
            .await
            .unwrap()
            .expect("a slot within the horizon");

        // 10:15 and 11:15 hit the 10:00–12:00 booking; 12:15 spills into
        // the break; 13:15 starts inside it; 14:15 is the first clear one
        assert_eq!(slot.date, monday());
        assert_eq!(slot.start_time, t(14, 15));
        assert!(slot.available);
    }

    #[tokio::test]
    async fn nearest_slot_jumps_past_the_late_cutoff_and_closed_days() {
        let f = fixture().await;
        // Saturday 23:00 is past the cutoff; Sunday is closed
        let late_saturday = Utc.with_ymd_and_hms(2026, 3, 7, 23, 0, 0).unwrap();
        let slot = f
            .generator
            .find_nearest_available_slot(f.provider_id, late_saturday, 60, 7, late_saturday)
            .await
            .unwrap()
            .expect("a slot within the horizon");

        assert_eq!(slot.date, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        assert_eq!(slot.start_time, t(9, 0));
    }

    #[tokio::test]
    async fn nearest_slot_respects_the_horizon() {
        let f = fixture().await;
        // Saturday evening with a zero-day horizon: Saturday is past the
        // cutoff and no other day may be considered
        let late_saturday = Utc.with_ymd_and_hms(2026, 3, 7, 23, 0, 0).unwrap();
        let slot = f
            .generator
            .find_nearest_available_slot(f.provider_id, late_saturday, 60, 0, late_saturday)
            .await
            .unwrap();
        assert!(slot.is_none());
    }

    #[tokio::test]
    async fn occupancy_counts_ticks_without_past_skip() {
        let f = fixture().await;
        BookingRepository::save(
            f.storage.as_ref(),
            Booking::new(
                Uuid::new_v4(),
                f.provider_id,
                Uuid::new_v4(),
                None,
                monday(),
                t(10, 0),
                60,
                Decimal::from(1000),
                sample_now(),
            ),
        )
        .await
        .unwrap();

        // late in the day; past ticks still count toward capacity
        let evening = Utc.with_ymd_and_hms(2026, 3, 2, 20, 0, 0).unwrap();
        let stats = f
            .generator
            .occupancy_stats(f.provider_id, monday(), monday(), evening)
            .await
            .unwrap();

        // 09:00..17:30 in 30-minute ticks = 18, minus the two inside the
        // break = 16; the 60-minute booking blocks the 10:00 and 10:30 ticks
        assert_eq!(stats.total_slots, 16);
        assert_eq!(stats.busy_slots, 2);
        assert_eq!(stats.available_slots, 14);
        assert_eq!(stats.occupancy_rate, 12.5);
        assert_eq!(stats.availability_rate, 87.5);
    }

    #[tokio::test]
    async fn occupancy_over_a_closed_range_is_zero() {
        let f = fixture().await;
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let stats = f
            .generator
            .occupancy_stats(f.provider_id, sunday, sunday, sample_now())
            .await
            .unwrap();
        assert_eq!(stats.total_slots, 0);
        assert_eq!(stats.occupancy_rate, 0.0);
    }
}
