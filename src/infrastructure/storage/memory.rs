//! In-memory storage implementation
//!
//! Backs every repository trait for development and testing. The
//! reservation write path is serialized by a mutex so check-and-insert
//! behaves like the transactional store it stands in for.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::reservation::{ReservationStatus, ReservationStore, SlotReservation};
use crate::domain::schedule::{ProviderScheduleRepository, WeeklySchedule};
use crate::domain::service::{Service, ServiceRepository};
use crate::domain::time_window::TimeWindow;
use crate::domain::{DomainError, DomainResult};

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    schedules: DashMap<Uuid, WeeklySchedule>,
    services: DashMap<Uuid, Service>,
    bookings: DashMap<Uuid, Booking>,
    reservations: DashMap<Uuid, SlotReservation>,
    /// Serializes reservation check-and-insert
    reservation_write_lock: Mutex<()>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            schedules: DashMap::new(),
            services: DashMap::new(),
            bookings: DashMap::new(),
            reservations: DashMap::new(),
            reservation_write_lock: Mutex::new(()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn booking_overlaps(booking: &Booking, window: &TimeWindow) -> bool {
    booking.start_instant() < window.end() && window.start() < booking.end_instant()
}

fn reservation_overlaps(reservation: &SlotReservation, window: &TimeWindow) -> bool {
    reservation.start_instant() < window.end() && window.start() < reservation.end_instant()
}

#[async_trait]
impl ProviderScheduleRepository for InMemoryStorage {
    async fn find_for_provider(&self, provider_id: Uuid) -> DomainResult<Option<WeeklySchedule>> {
        Ok(self.schedules.get(&provider_id).map(|s| s.clone()))
    }

    async fn save_for_provider(
        &self,
        provider_id: Uuid,
        schedule: WeeklySchedule,
    ) -> DomainResult<()> {
        self.schedules.insert(provider_id, schedule);
        Ok(())
    }
}

#[async_trait]
impl ServiceRepository for InMemoryStorage {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Service>> {
        Ok(self.services.get(&id).map(|s| s.clone()))
    }

    async fn save(&self, service: Service) -> DomainResult<()> {
        self.services.insert(service.id, service);
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStorage {
    async fn save(&self, booking: Booking) -> DomainResult<()> {
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_active_overlapping(
        &self,
        provider_id: Uuid,
        window: &TimeWindow,
        exclude_id: Option<Uuid>,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| {
                b.provider_id == provider_id
                    && Some(b.id) != exclude_id
                    && b.is_active()
                    && booking_overlaps(b, window)
            })
            .map(|b| b.clone())
            .collect())
    }

    async fn find_active_overlapping_for_customer(
        &self,
        customer_id: Uuid,
        window: &TimeWindow,
        exclude_id: Option<Uuid>,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| {
                b.customer_id == customer_id
                    && Some(b.id) != exclude_id
                    && b.is_active()
                    && booking_overlaps(b, window)
            })
            .map(|b| b.clone())
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let Some(mut booking) = self.bookings.get_mut(&id) else {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        };
        booking.status = status;
        booking.updated_at = now;
        Ok(())
    }

    async fn update_schedule(
        &self,
        id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        let Some(mut booking) = self.bookings.get_mut(&id) else {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        };
        booking.date = date;
        booking.start_time = start_time;
        booking.duration_minutes = duration_minutes;
        booking.updated_at = now;
        Ok(booking.clone())
    }
}

#[async_trait]
impl ReservationStore for InMemoryStorage {
    async fn insert_if_available(
        &self,
        reservation: SlotReservation,
        now: DateTime<Utc>,
    ) -> DomainResult<SlotReservation> {
        let window = TimeWindow::from_start(
            reservation.start_instant(),
            reservation.duration_minutes,
        )?;

        let _guard = self.reservation_write_lock.lock().await;

        let booked = self
            .bookings
            .iter()
            .any(|b| {
                b.provider_id == reservation.provider_id
                    && b.is_active()
                    && booking_overlaps(&b, &window)
            });
        let held = self.reservations.iter().any(|r| {
            r.provider_id == reservation.provider_id
                && r.is_active(now)
                && reservation_overlaps(&r, &window)
        });
        if booked || held {
            return Err(DomainError::SlotUnavailable {
                provider_id: reservation.provider_id,
                start: window.start(),
            });
        }

        self.reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<SlotReservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn update_status(&self, id: Uuid, status: ReservationStatus) -> DomainResult<bool> {
        match self.reservations.get_mut(&id) {
            Some(mut reservation) => {
                reservation.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_active_overlapping(
        &self,
        provider_id: Uuid,
        window: &TimeWindow,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<SlotReservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| {
                r.provider_id == provider_id && r.is_active(now) && reservation_overlaps(r, window)
            })
            .map(|r| r.clone())
            .collect())
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> DomainResult<Vec<SlotReservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Reserved && now > r.reserved_until)
            .map(|r| r.clone())
            .collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────
