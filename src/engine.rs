//! Engine facade
//!
//! Wires the application services over a set of repository collaborators
//! and exposes the operations the application/API layer consumes.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::application::services::{
    BookingService, CancellationOutcome, OverlapChecker, ReservationManager, ReservationSweeper,
    ScheduleResolver, SlotGenerator,
};
use crate::config::EngineConfig;
use crate::domain::booking::{Booking, BookingRepository};
use crate::domain::fee::{CancellationInitiator, FeeQuote};
use crate::domain::reservation::{ReservationStore, SlotReservation};
use crate::domain::schedule::ProviderScheduleRepository;
use crate::domain::service::ServiceRepository;
use crate::domain::slot::{OccupancyStats, Slot, SlotCache};
use crate::domain::time_window::TimeWindow;
use crate::domain::DomainResult;
use crate::shared::shutdown::ShutdownSignal;

/// The availability and slot-reservation engine
pub struct BookingEngine {
    slots: Arc<SlotGenerator>,
    reservations: Arc<ReservationManager>,
    bookings: Arc<BookingService>,
    config: EngineConfig,
}

impl BookingEngine {
    pub fn new(
        schedules: Arc<dyn ProviderScheduleRepository>,
        services: Arc<dyn ServiceRepository>,
        bookings: Arc<dyn BookingRepository>,
        reservations: Arc<dyn ReservationStore>,
        cache: Arc<dyn SlotCache>,
        config: EngineConfig,
    ) -> Self {
        let resolver = Arc::new(ScheduleResolver::new(schedules));
        let overlap = Arc::new(OverlapChecker::new(bookings.clone(), reservations.clone()));
        let slots = Arc::new(SlotGenerator::new(
            resolver.clone(),
            overlap.clone(),
            services,
            cache.clone(),
            config.clone(),
        ));
        let reservation_manager = Arc::new(ReservationManager::new(
            reservations,
            cache.clone(),
            config.clone(),
        ));
        let booking_service = Arc::new(BookingService::new(bookings, overlap, resolver, cache));

        Self {
            slots,
            reservations: reservation_manager,
            bookings: booking_service,
            config,
        }
    }

    /// Per-date slot lists for a service over a date range.
    pub async fn availability(
        &self,
        provider_id: Uuid,
        service_id: Uuid,
        from_date: NaiveDate,
        days_ahead: u32,
        now: DateTime<Utc>,
    ) -> DomainResult<BTreeMap<NaiveDate, Vec<Slot>>> {
        self.slots
            .available_slots(provider_id, service_id, from_date, days_ahead, now)
            .await
    }

    /// Hold a window for a customer; fails with `SlotUnavailable` when it
    /// was claimed concurrently.
    pub async fn reserve(
        &self,
        provider_id: Uuid,
        window: &TimeWindow,
        customer_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<SlotReservation> {
        self.reservations
            .reserve_slot(provider_id, window, customer_id, now)
            .await
    }

    /// Release a hold; `false` for unknown or already-terminal holds.
    pub async fn release(&self, reservation_id: Uuid) -> DomainResult<bool> {
        self.reservations.release_slot(reservation_id).await
    }

    /// First available slot at or after `preferred_time`.
    pub async fn nearest_slot(
        &self,
        provider_id: Uuid,
        preferred_time: DateTime<Utc>,
        duration_minutes: i64,
        search_days: u32,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Slot>> {
        self.slots
            .find_nearest_available_slot(provider_id, preferred_time, duration_minutes, search_days, now)
            .await
    }

    /// Tick-level occupancy aggregates over a date range.
    pub async fn occupancy_stats(
        &self,
        provider_id: Uuid,
        from_date: NaiveDate,
        to_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<OccupancyStats> {
        self.slots
            .occupancy_stats(provider_id, from_date, to_date, now)
            .await
    }

    /// Quote the cancellation fee for a booking without changing anything.
    pub async fn cancellation_fee(
        &self,
        booking_id: Uuid,
        initiator: CancellationInitiator,
        now: DateTime<Utc>,
    ) -> DomainResult<FeeQuote> {
        self.bookings
            .cancellation_quote(booking_id, initiator, now)
            .await
    }

    /// Cancel a booking and report the refund owed.
    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        initiator: CancellationInitiator,
        now: DateTime<Utc>,
    ) -> DomainResult<CancellationOutcome> {
        self.bookings.cancel_booking(booking_id, initiator, now).await
    }

    /// Move a booking to a new validated window.
    pub async fn reschedule_booking(
        &self,
        booking_id: Uuid,
        new_date: NaiveDate,
        new_start_time: NaiveTime,
        new_duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        self.bookings
            .reschedule_booking(booking_id, new_date, new_start_time, new_duration_minutes, now)
            .await
    }

    /// Start the optional background sweep of expired holds.
    pub fn start_sweeper(&self, shutdown: ShutdownSignal) {
        ReservationSweeper::new(self.reservations.clone(), self.config.sweep_interval_secs)
            .start(shutdown);
    }

    pub fn slots(&self) -> &SlotGenerator {
        &self.slots
    }

    pub fn reservations(&self) -> &ReservationManager {
        &self.reservations
    }

    pub fn bookings(&self) -> &BookingService {
        &self.bookings
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::{WeeklySchedule, WorkingHours};
    use crate::domain::service::Service;
    use crate::domain::DomainError;
    use crate::infrastructure::cache::InMemorySlotCache;
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::{TimeZone, Weekday};
    use rust_decimal::Decimal;

    fn t(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
    }

    async fn engine_fixture() -> (BookingEngine, Uuid, Uuid) {
        let storage = Arc::new(InMemoryStorage::new());
        let cache = Arc::new(InMemorySlotCache::new(
            EngineConfig::default().cache_ttl_secs,
        ));
        let provider_id = Uuid::new_v4();
        let service_id = Uuid::new_v4();

        let hours = WorkingHours::new(t(9, 0), t(18, 0)).unwrap();
        let schedule = WeeklySchedule::closed()
            .with_day(Weekday::Mon, hours.clone())
            .with_day(Weekday::Tue, hours);
        ProviderScheduleRepository::save_for_provider(storage.as_ref(), provider_id, schedule)
            .await
            .unwrap();
        ServiceRepository::save(
            storage.as_ref(),
            Service::new(service_id, "Hot stone massage", 60, Decimal::from(1500), now()),
        )
        .await
        .unwrap();

        let engine = BookingEngine::new(
            storage.clone(),
            storage.clone(),
            storage.clone(),
            storage.clone(),
            cache,
            EngineConfig::default(),
        );
        (engine, provider_id, service_id)
    }

    #[tokio::test]
    async fn reserve_release_retry_flow() {
        let (engine, provider_id, _) = engine_fixture().await;
        let customer_x = Uuid::new_v4();
        let customer_y = Uuid::new_v4();
        let window = TimeWindow::from_start(
            Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
            60,
        )
        .unwrap();

        let hold = engine
            .reserve(provider_id, &window, customer_x, now())
            .await
            .unwrap();

        let err = engine
            .reserve(provider_id, &window, customer_y, now())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SlotUnavailable { .. }));

        assert!(engine.release(hold.id).await.unwrap());

        engine
            .reserve(provider_id, &window, customer_y, now())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn a_hold_shows_up_in_the_next_availability_read() {
        let (engine, provider_id, service_id) = engine_fixture().await;
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        let before = engine
            .availability(provider_id, service_id, monday, 0, now())
            .await
            .unwrap();
        assert!(before[&monday].iter().all(|s| s.available));

        let window = TimeWindow::from_start(
            Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
            60,
        )
        .unwrap();
        engine
            .reserve(provider_id, &window, Uuid::new_v4(), now())
            .await
            .unwrap();

        // the reserve invalidated the cached day, so the hold is visible
        let after = engine
            .availability(provider_id, service_id, monday, 0, now())
            .await
            .unwrap();
        let held: Vec<_> = after[&monday]
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.start_time)
            .collect();
        assert_eq!(held, vec![t(9, 30), t(10, 0), t(10, 30)]);
    }
}
